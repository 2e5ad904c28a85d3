use serde::Serialize;

use super::registry::ResultRegistry;

pub const STATUS_CREATED: u16 = 201;
pub const STATUS_PARTIAL_CONTENT: u16 = 206;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Classification of a whole batch, derived from its frozen registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateStatus {
    AllSucceeded,
    AllFailed,
    PartialSuccess,
}

impl AggregateStatus {
    pub fn resolve(registry: &ResultRegistry) -> Self {
        let successes = registry.success_count();

        if successes == 0 {
            AggregateStatus::AllFailed
        } else if successes == registry.len() {
            AggregateStatus::AllSucceeded
        } else {
            AggregateStatus::PartialSuccess
        }
    }

    /// HTTP status that stands for the whole batch.
    ///
    /// When everything failed there is no success status to report, so the
    /// first failure's status is used; an empty batch reports 400.
    pub fn representative_status(&self, registry: &ResultRegistry) -> u16 {
        match self {
            AggregateStatus::AllSucceeded => STATUS_CREATED,
            AggregateStatus::PartialSuccess => STATUS_PARTIAL_CONTENT,
            AggregateStatus::AllFailed => registry
                .first_failure()
                .map(|error| error.status)
                .unwrap_or(STATUS_BAD_REQUEST),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateStatus::AllSucceeded => "all_succeeded",
            AggregateStatus::AllFailed => "all_failed",
            AggregateStatus::PartialSuccess => "partial_success",
        }
    }
}

impl std::fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::{BatchItem, Outcome};
    use repoforge_core::{ApiError, CreateRepoRequest, CreateRepoResponse};

    fn registry(outcomes: Vec<Outcome>) -> ResultRegistry {
        let expected = outcomes.len();
        let items = outcomes
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| BatchItem {
                index,
                request: CreateRepoRequest::new("testing"),
                outcome,
            })
            .collect();
        ResultRegistry::freeze(items, expected).unwrap()
    }

    fn ok() -> Outcome {
        Outcome::Success(CreateRepoResponse {
            id: 123,
            name: "testing".to_string(),
            owner: "EBKopec".to_string(),
        })
    }

    fn err(status: u16) -> Outcome {
        Outcome::Failure(ApiError::new(status, "failed"))
    }

    #[test]
    fn test_all_succeeded() {
        let registry = registry(vec![ok(), ok()]);
        let status = AggregateStatus::resolve(&registry);
        assert_eq!(status, AggregateStatus::AllSucceeded);
        assert_eq!(status.representative_status(&registry), 201);
    }

    #[test]
    fn test_partial_success() {
        let registry = registry(vec![err(400), ok()]);
        let status = AggregateStatus::resolve(&registry);
        assert_eq!(status, AggregateStatus::PartialSuccess);
        assert_eq!(status.representative_status(&registry), 206);
    }

    #[test]
    fn test_all_failed_reports_first_failure() {
        let registry = registry(vec![err(401), err(400)]);
        let status = AggregateStatus::resolve(&registry);
        assert_eq!(status, AggregateStatus::AllFailed);
        assert_eq!(status.representative_status(&registry), 401);
    }

    #[test]
    fn test_empty_batch() {
        let registry = registry(Vec::new());
        let status = AggregateStatus::resolve(&registry);
        assert_eq!(status, AggregateStatus::AllFailed);
        assert_eq!(status.representative_status(&registry), 400);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AggregateStatus::PartialSuccess.to_string(), "partial_success");
        assert_eq!(
            serde_json::to_value(AggregateStatus::AllSucceeded).unwrap(),
            "all_succeeded"
        );
    }
}
