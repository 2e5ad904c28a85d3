pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Repoforge API",
        version = "0.1.0",
        description = "Create GitHub repositories one at a time or in concurrent batches"
    ),
    paths(
        routes::health_check,
        routes::marco,
        routes::create_repo,
        routes::create_repos,
        routes::create_repos_bulk,
    ),
    components(schemas(
        routes::HealthResponse,
        routes::RepoResultDto,
        routes::CreateReposResponse,
        routes::BulkCreateResponse,
        repoforge_core::CreateRepoRequest,
        repoforge_core::CreateRepoResponse,
        repoforge_core::ApiError,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "repositories", description = "Repository creation endpoints"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/openapi.json", get(openapi_json))
        .route("/health", get(routes::health_check))
        .route("/marco", get(routes::marco))
        .route("/repository", post(routes::create_repo))
        .route("/repositories", post(routes::create_repos))
        .route("/repositories/bulk", post(routes::create_repos_bulk))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
