pub mod access;
pub mod jwt;
pub mod password;

pub use access::AccessManager;
pub use jwt::{Claims, JwtError, JwtManager};
