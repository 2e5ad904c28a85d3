use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use repoforge_core::ApiError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Api(ApiError),
    Orchestrator(OrchestratorError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = match self {
            AppError::BadRequest(msg) => ApiError::bad_request(msg),
            AppError::Api(err) => err,
            AppError::Orchestrator(err) => {
                tracing::error!("Orchestrator error: {:?}", err);
                ApiError::internal(err.to_string())
            }
        };

        let status =
            StatusCode::from_u16(error.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(error)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<OrchestratorError> for AppError {
    fn from(err: OrchestratorError) -> Self {
        AppError::Orchestrator(err)
    }
}
