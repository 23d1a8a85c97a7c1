use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(user_routes())
        .merge(request_routes())
        .merge(request_stage_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    let mut app = Router::new()
        .merge(public_routes())
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http());

    if state.config.security.enable_cors {
        app = app.layer(cors_layer(&state.config.security));
    }

    app.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .route("/users/login", post(public::login::login))
}

fn user_routes() -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", get(users::show).put(users::update))
        .route("/users/:id/requests", get(users::requests))
        .route("/users/role/:id", patch(users::update_role))
}

fn request_routes() -> Router<AppState> {
    use protected::{request_files, requests};

    Router::new()
        .route("/requests", get(requests::list).post(requests::create))
        .route("/requests/:id", get(requests::show).put(requests::update))
        .route("/requests/:id/request-stages", get(requests::stages))
        .route(
            "/requests/:id/files",
            get(request_files::list).post(request_files::create),
        )
}

fn request_stage_routes() -> Router<AppState> {
    use protected::request_stages;

    Router::new().route(
        "/request-stages",
        get(request_stages::show).post(request_stages::create),
    )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any);

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::testing::TestContext;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app(ctx: &TestContext) -> Router {
        router(ctx.state.clone())
    }

    #[tokio::test]
    async fn health_is_public() {
        let ctx = TestContext::new();
        let response = app(&ctx)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let ctx = TestContext::new();
        let response = app(&ctx)
            .oneshot(Request::get("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler() {
        let ctx = TestContext::new();
        let user = ctx.create_user("reader@example.com").await;
        let token = ctx.token_for(&user);

        let response = app(&ctx)
            .oneshot(
                Request::get(format!("/users/{}", user.id))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn simple_user_cannot_create_users() {
        let ctx = TestContext::new();
        let user = ctx.create_user("simple@example.com").await;
        let token = ctx.token_for(&user);

        let body = serde_json::json!({
            "name": "Eve",
            "email": "eve@example.com",
            "password": "eve-password",
            "role": "ADMINISTRATOR"
        });
        let response = app(&ctx)
            .oneshot(
                Request::post("/users")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_role_change_answers_with_empty_body() {
        let ctx = TestContext::new();
        let admin = ctx.create_admin("root@example.com").await;
        let user = ctx.create_user("simple@example.com").await;

        let response = app(&ctx)
            .oneshot(
                Request::patch(format!("/users/role/{}", user.id))
                    .header(header::AUTHORIZATION, format!("Bearer {}", ctx.token_for(&admin)))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"role":"ADMINISTRATOR"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_rejected_with_error_envelope() {
        let ctx = TestContext::new();
        let user = ctx.create_user("reader@example.com").await;

        let response = app(&ctx)
            .oneshot(
                Request::get("/requests/not-a-number")
                    .header(header::AUTHORIZATION, format!("Bearer {}", ctx.token_for(&user)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[test]
    fn explicit_cors_origins_are_accepted() {
        let mut config = AppConfig::in_memory();
        config.security.cors_origins = vec!["https://tracker.example.com".to_string()];
        let _ = cors_layer(&config.security);
    }
}
