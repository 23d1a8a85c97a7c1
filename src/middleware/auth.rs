use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::Claims;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            roles: vec![user.role.authority()],
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.uid,
            email: claims.sub,
            roles: claims.roles,
        }
    }
}

/// Verifies the bearer token and stores the caller in request extensions
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).map_err(|msg| {
        warn!(path = %request.uri().path(), "Rejected request: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let claims = state.jwt.verify(token).map_err(|e| {
        warn!(path = %request.uri().path(), "Rejected token: {}", e);
        ApiError::from(e)
    })?;

    debug!(subject = %claims.sub, "Authenticated request");
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty bearer token");
    }
    Ok(token)
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Caller whose stored account holds `ROLE_ADMINISTRATOR`; anyone else gets 403.
/// Reads the stored role, not the token's `roles` claim.
#[derive(Clone, Debug)]
pub struct RequireAdmin(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        state.access.ensure_admin(&user).await?;
        Ok(RequireAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn missing_or_malformed_header_is_rejected() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
        assert!(extract_bearer_token(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_bearer_token(&headers("Bearer   ")).is_err());
    }

    #[test]
    fn claims_map_onto_caller() {
        let claims = Claims {
            sub: "ada@example.com".to_string(),
            uid: 7,
            roles: vec!["ROLE_SIMPLE".to_string()],
            iss: "request-tracker".to_string(),
            iat: 0,
            exp: 0,
            jti: uuid::Uuid::new_v4(),
        };

        let caller = AuthUser::from(claims);
        assert_eq!(caller.id, 7);
        assert_eq!(caller.email, "ada@example.com");
        assert_eq!(caller.roles, vec!["ROLE_SIMPLE".to_string()]);
    }
}
