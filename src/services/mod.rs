pub mod session_service;
pub mod upload_service;

pub use session_service::SessionService;
pub use upload_service::{UploadService, UploadSummary};
