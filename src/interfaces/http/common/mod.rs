//! Shared HTTP types: response envelope and validated extractor

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for every JSON response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
