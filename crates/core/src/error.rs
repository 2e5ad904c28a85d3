use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// An HTTP-shaped failure: a status code plus a human-readable message.
///
/// Validation failures and failures propagated from GitHub share this type;
/// they are told apart only by the status and message they carry.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, ToSchema)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(STATUS_BAD_REQUEST, message).with_slug("bad_request")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(STATUS_INTERNAL_SERVER_ERROR, message).with_slug("internal_server_error")
    }

    fn with_slug(mut self, slug: &str) -> Self {
        self.error = Some(slug.to_string());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
