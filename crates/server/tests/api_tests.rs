use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use github::{ApiConfig, GitHubClient};
use orchestrator::{BatchCreator, RepoCreator, RepositoryService};
use serde_json::{json, Value};
use server::{create_router, state::AppState};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_test_server() -> (TestServer, MockServer) {
    let mock_github = MockServer::start().await;

    let client = GitHubClient::new("test-token", ApiConfig::new(mock_github.uri()))
        .expect("Failed to create GitHub client");
    let creator: Arc<dyn RepoCreator> = Arc::new(RepositoryService::new(client));
    let batch = BatchCreator::new(creator)
        .with_max_concurrency(2)
        .expect("Failed to configure batch creator");

    let app = create_router(AppState::new(batch));
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, mock_github)
}

fn created(name: &str, id: u64) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "id": id,
        "name": name,
        "full_name": format!("EBKopec/{name}"),
        "owner": { "login": "EBKopec", "id": 1 },
        "private": false
    }))
}

async fn mock_created(mock: &MockServer, name: &str, id: u64) {
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(header("authorization", "token test-token"))
        .and(body_partial_json(json!({ "name": name })))
        .respond_with(created(name, id))
        .mount(mock)
        .await;
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_marco_polo() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/marco").await;

        response.assert_status_ok();
        response.assert_text("polo");
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/api/openapi.json").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["paths"]["/repositories/bulk"].is_object());
        assert!(body["paths"]["/repository"].is_object());
    }
}

mod repository {
    use super::*;

    #[tokio::test]
    async fn test_create_repo_success() {
        let (server, mock) = setup_test_server().await;
        mock_created(&mock, "testing", 123).await;

        let response = server
            .post("/repository")
            .json(&json!({ "name": "testing", "description": "a test repo" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["id"], 123);
        assert_eq!(body["name"], "testing");
        assert_eq!(body["owner"], "EBKopec");
    }

    #[tokio::test]
    async fn test_create_repo_with_client_id_header() {
        let (server, mock) = setup_test_server().await;
        mock_created(&mock, "testing", 123).await;

        let response = server
            .post("/repository")
            .add_header(
                HeaderName::from_static("x-client-id"),
                HeaderValue::from_static("web-frontend"),
            )
            .json(&json!({ "name": "testing" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["id"], 123);
    }

    #[tokio::test]
    async fn test_create_repo_invalid_name() {
        let (server, mock) = setup_test_server().await;

        let response = server.post("/repository").json(&json!({ "name": "   " })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "invalid repository name");
        assert!(mock.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_repo_invalid_json() {
        let (server, _mock) = setup_test_server().await;

        let response = server.post("/repository").text("not json").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "invalid json body");
    }

    #[tokio::test]
    async fn test_create_repo_github_error_is_forwarded() {
        let (server, mock) = setup_test_server().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Requires authentication",
                "documentation_url": "https://developer.github.com/docs"
            })))
            .mount(&mock)
            .await;

        let response = server.post("/repository").json(&json!({ "name": "testing" })).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["status"], 401);
        assert_eq!(body["message"], "Requires authentication");
    }
}

mod repositories {
    use super::*;

    #[tokio::test]
    async fn test_partial_success() {
        let (server, mock) = setup_test_server().await;
        mock_created(&mock, "testing", 123).await;

        let response = server
            .post("/repositories")
            .json(&json!([{}, { "name": "testing" }]))
            .await;

        response.assert_status(StatusCode::PARTIAL_CONTENT);
        let body: Value = response.json();
        assert_eq!(body["status"], "partial_success");
        assert_eq!(body["status_code"], 206);

        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["index"], 0);
        assert_eq!(results[0]["error"]["message"], "invalid repository name");
        assert!(results[0].get("response").is_none());
        assert_eq!(results[1]["index"], 1);
        assert_eq!(results[1]["response"]["id"], 123);
        assert!(results[1].get("error").is_none());
    }

    #[tokio::test]
    async fn test_all_succeeded() {
        let (server, mock) = setup_test_server().await;
        mock_created(&mock, "first", 1).await;
        mock_created(&mock, "second", 2).await;

        let response = server
            .post("/repositories")
            .json(&json!([{ "name": "first" }, { "name": "second" }]))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["status"], "all_succeeded");
        assert_eq!(body["results"][0]["response"]["id"], 1);
        assert_eq!(body["results"][1]["response"]["id"], 2);
    }

    #[tokio::test]
    async fn test_all_invalid() {
        let (server, mock) = setup_test_server().await;

        let response = server
            .post("/repositories")
            .json(&json!([{ "name": "" }, { "name": " " }]))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["status"], "all_failed");
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
        assert!(mock.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_failed_uses_first_failure_status() {
        let (server, mock) = setup_test_server().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Repository creation failed."
            })))
            .mount(&mock)
            .await;

        let response = server
            .post("/repositories")
            .json(&json!([{ "name": "taken" }, { "name": "" }]))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["results"][0]["error"]["status"], 422);
        assert_eq!(body["results"][1]["error"]["status"], 400);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let (server, _mock) = setup_test_server().await;

        let response = server.post("/repositories").json(&json!([])).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["status"], "all_failed");
        assert!(body["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (server, _mock) = setup_test_server().await;

        let response = server.post("/repositories").json(&json!({ "name": "x" })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "invalid json body");
    }
}

mod bulk {
    use super::*;

    #[tokio::test]
    async fn test_bulk_groups_by_name() {
        let (server, mock) = setup_test_server().await;
        mock_created(&mock, "alpha", 1).await;
        mock_created(&mock, "beta", 2).await;
        mock_created(&mock, "gamma", 3).await;

        let response = server
            .post("/repositories/bulk")
            .json(&json!([
                { "name": "alpha" },
                { "name": "" },
                { "name": "beta" },
                { "name": "gamma" }
            ]))
            .await;

        response.assert_status(StatusCode::PARTIAL_CONTENT);
        let body: Value = response.json();
        assert_eq!(body["status"], "partial_success");
        assert_eq!(body["succeeded"]["alpha"]["id"], 1);
        assert_eq!(body["succeeded"]["beta"]["id"], 2);
        assert_eq!(body["succeeded"]["gamma"]["id"], 3);
        assert_eq!(body["failed"][""]["message"], "invalid repository name");
        assert_eq!(body["results"].as_array().unwrap().len(), 4);
        assert_eq!(mock.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_bulk_all_succeeded() {
        let (server, mock) = setup_test_server().await;
        for (id, name) in ["one", "two", "three", "four", "five"].iter().enumerate() {
            mock_created(&mock, name, id as u64 + 1).await;
        }

        let response = server
            .post("/repositories/bulk")
            .json(&json!([
                { "name": "one" },
                { "name": "two" },
                { "name": "three" },
                { "name": "four" },
                { "name": "five" }
            ]))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["status"], "all_succeeded");
        assert_eq!(body["succeeded"].as_object().unwrap().len(), 5);
        assert!(body["failed"].as_object().unwrap().is_empty());
    }
}
