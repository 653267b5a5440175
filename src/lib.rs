pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod source;

pub use api::{router, AppState};
pub use config::AppConfig;
pub use error::{AppError, SourceError};
pub use service::ReportService;
