use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

pub const INVALID_REPOSITORY_NAME: &str = "invalid repository name";

/// A request to create one repository for the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateRepoRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
}

impl CreateRepoRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn as_private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Rejects blank names before any remote call is made.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::bad_request(INVALID_REPOSITORY_NAME));
        }
        Ok(())
    }

    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

/// The repository as confirmed by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateRepoResponse {
    pub id: u64,
    pub name: String,
    pub owner: String,
}
