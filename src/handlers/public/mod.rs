pub mod login;
pub mod system;
