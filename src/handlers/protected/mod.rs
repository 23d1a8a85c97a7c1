// Every route here sits behind `jwt_auth_middleware`. Handlers that need
// more than a valid token take `RequireAdmin` or call `AccessManager`
// before touching a service.
pub mod request_files;
pub mod request_stages;
pub mod requests;
pub mod users;
