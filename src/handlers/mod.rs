// Handlers are split by security tier:
// public (no token) and protected (bearer token, with per-route role
// and ownership guards).
pub mod protected;
pub mod public;
