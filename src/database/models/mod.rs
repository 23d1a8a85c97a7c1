pub mod request;
pub mod request_file;
pub mod request_stage;
pub mod user;

pub use request::{NewRequest, Request};
pub use request_file::{NewRequestFile, RequestFile};
pub use request_stage::{NewRequestStage, RequestStage};
pub use user::{NewUser, User};
