use repoforge_core::{ApiError, CreateRepoRequest, CreateRepoResponse};
use serde::Serialize;

/// Result of one repository creation: exactly one of response or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success(CreateRepoResponse),
    Failure(ApiError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn response(&self) -> Option<&CreateRepoResponse> {
        match self {
            Outcome::Success(response) => Some(response),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<CreateRepoResponse, ApiError> {
        match self {
            Outcome::Success(response) => Ok(response),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl From<Result<CreateRepoResponse, ApiError>> for Outcome {
    fn from(result: Result<CreateRepoResponse, ApiError>) -> Self {
        match result {
            Ok(response) => Outcome::Success(response),
            Err(error) => Outcome::Failure(error),
        }
    }
}

/// An [`Outcome`] tagged with the request it answers and its submission index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItem {
    pub index: usize,
    pub request: CreateRepoRequest,
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> CreateRepoResponse {
        CreateRepoResponse {
            id: 123,
            name: "testing".to_string(),
            owner: "EBKopec".to_string(),
        }
    }

    #[test]
    fn test_success_accessors() {
        let outcome = Outcome::from(Ok(response()));
        assert!(outcome.is_success());
        assert_eq!(outcome.response().map(|r| r.id), Some(123));
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_failure_accessors() {
        let outcome = Outcome::from(Err(ApiError::bad_request("invalid repository name")));
        assert!(!outcome.is_success());
        assert!(outcome.response().is_none());
        assert_eq!(outcome.error().map(|e| e.status), Some(400));
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let value = serde_json::to_value(Outcome::Success(response())).unwrap();
        assert_eq!(value["success"]["name"], "testing");

        let value =
            serde_json::to_value(Outcome::Failure(ApiError::new(401, "Requires authentication")))
                .unwrap();
        assert_eq!(value["failure"]["status"], 401);
    }
}
