/// Authentication helpers for IBM Cloud IAM.
pub mod auth;
/// Request plumbing shared by every operation: responses, patches, polymorphic decoding and paging.
pub mod common;
/// External configuration (credentials file and environment variables).
pub mod config;
/// Error types returned by every operation.
pub mod error;
/// VPC v1 service client, models and operations.
pub mod vpc;

pub use error::{ApiError, ApiErrorKind, Error, Result};
pub use vpc::serviceclient::{VpcService, VpcServiceOptions};

/// Logging verbosity for SDK operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit request and response bodies in addition to request lines.
    Debug,
    /// Emit request lines and failures only.
    Information,
}

impl Default for LogLevel {
    /// Defaults to `Information` logging.
    fn default() -> Self {
        LogLevel::Information
    }
}
