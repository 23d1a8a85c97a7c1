pub mod error;
pub mod request_file_service;
pub mod request_service;
pub mod request_stage_service;
pub mod user_service;

pub use error::ServiceError;
pub use request_file_service::RequestFileService;
pub use request_service::RequestService;
pub use request_stage_service::RequestStageService;
pub use user_service::UserService;
