use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use orchestrator::{BatchItem, BatchReport, BulkReport, Outcome};
use repoforge_core::{ApiError, CreateRepoRequest, CreateRepoResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

const INVALID_JSON_BODY: &str = "invalid json body";

/// Header carrying the caller's client id; absent means an anonymous caller.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

#[derive(Debug, Serialize, ToSchema)]
pub struct RepoResultDto {
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<CreateRepoResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<BatchItem> for RepoResultDto {
    fn from(item: BatchItem) -> Self {
        let (response, error) = match item.outcome {
            Outcome::Success(response) => (Some(response), None),
            Outcome::Failure(error) => (None, Some(error)),
        };

        Self {
            index: item.index,
            name: item.request.name,
            response,
            error,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReposResponse {
    /// `all_succeeded`, `all_failed` or `partial_success`
    pub status: String,
    pub status_code: u16,
    pub results: Vec<RepoResultDto>,
}

impl From<BatchReport> for CreateReposResponse {
    fn from(report: BatchReport) -> Self {
        Self {
            status: report.status.as_str().to_string(),
            status_code: report.status_code,
            results: report.results.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkCreateResponse {
    pub status: String,
    pub status_code: u16,
    pub succeeded: BTreeMap<String, CreateRepoResponse>,
    pub failed: BTreeMap<String, ApiError>,
    pub results: Vec<RepoResultDto>,
}

impl From<BulkReport> for BulkCreateResponse {
    fn from(report: BulkReport) -> Self {
        Self {
            status: report.status.as_str().to_string(),
            status_code: report.status_code,
            succeeded: report.succeeded,
            failed: report.failed,
            results: report.results.into_iter().map(Into::into).collect(),
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::BadRequest(INVALID_JSON_BODY.to_string())
    })
}

fn client_id(headers: &HeaderMap) -> &str {
    headers
        .get(CLIENT_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or_default()
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[utoipa::path(
    post,
    path = "/repository",
    request_body = CreateRepoRequest,
    params(("X-Client-Id" = Option<String>, Header, description = "Caller identifier used in logs")),
    responses(
        (status = 201, description = "Repository created", body = CreateRepoResponse),
        (status = 400, description = "Invalid repository name or body", body = ApiError),
        (status = 500, description = "GitHub call failed", body = ApiError)
    ),
    tag = "repositories"
)]
pub async fn create_repo(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateRepoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRepoResponse>), AppError> {
    let request = json_body(payload)?;
    let response = state.batch.create_repo(client_id(&headers), &request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/repositories",
    request_body = Vec<CreateRepoRequest>,
    params(("X-Client-Id" = Option<String>, Header, description = "Caller identifier used in logs")),
    responses(
        (status = 201, description = "Every repository was created", body = CreateReposResponse),
        (status = 206, description = "Some repositories were created", body = CreateReposResponse),
        (status = 400, description = "Invalid body, or every repository failed with 400", body = CreateReposResponse)
    ),
    tag = "repositories"
)]
pub async fn create_repos(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Vec<CreateRepoRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReposResponse>), AppError> {
    let requests = json_body(payload)?;
    let report = state.batch.create_repos(client_id(&headers), requests).await?;
    Ok((status_from(report.status_code), Json(report.into())))
}

#[utoipa::path(
    post,
    path = "/repositories/bulk",
    request_body = Vec<CreateRepoRequest>,
    params(("X-Client-Id" = Option<String>, Header, description = "Caller identifier used in logs")),
    responses(
        (status = 201, description = "Every repository was created", body = BulkCreateResponse),
        (status = 206, description = "Some repositories were created", body = BulkCreateResponse),
        (status = 400, description = "Invalid body, or every repository failed with 400", body = BulkCreateResponse)
    ),
    tag = "repositories"
)]
pub async fn create_repos_bulk(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Vec<CreateRepoRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<BulkCreateResponse>), AppError> {
    let requests = json_body(payload)?;
    let report = state
        .batch
        .create_repos_bounded(client_id(&headers), requests)
        .await?;
    Ok((status_from(report.status_code), Json(report.into())))
}
