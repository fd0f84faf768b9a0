pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::editor::handlers as editor;
use crate::generation::handlers as generation;
use crate::persistence::handlers as persistence;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document editing
        .route(
            "/api/v1/document",
            get(editor::handle_get_document).patch(editor::handle_patch_document),
        )
        .route("/api/v1/jobs", post(editor::handle_add_job))
        .route(
            "/api/v1/jobs/:index",
            patch(editor::handle_update_job).delete(editor::handle_remove_job),
        )
        .route("/api/v1/summary/clear", post(editor::handle_clear_summary))
        // Generation
        .route(
            "/api/v1/generate/summary",
            post(generation::handle_generate_summary),
        )
        .route(
            "/api/v1/jobs/:index/enhance",
            post(generation::handle_enhance_job),
        )
        // Preview
        .route("/", get(render::handle_preview_page))
        .route("/api/v1/preview", get(render::handle_preview_page))
        .route("/api/v1/preview/tree", get(render::handle_preview_tree))
        .route("/api/v1/document/raw", get(render::handle_raw_document))
        // Persistence
        .route("/api/v1/document/save", post(persistence::handle_save))
        .route("/api/v1/document/reset", post(persistence::handle_reset))
        .route("/api/v1/document/export", get(persistence::handle_export))
        .route("/api/v1/document/import", post(persistence::handle_import))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::generation::random::FixedSequence;
    use crate::models::ResumeDocument;
    use crate::persistence::{KeyValueStore, MemoryStore, Persistence, DEFAULT_STORAGE_KEY};
    use crate::render::EXPERIENCE_PLACEHOLDER;

    const BOUNDARY: &str = "resume-test-boundary";

    fn test_app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let persistence = Arc::new(Persistence::new(store.clone(), DEFAULT_STORAGE_KEY));
        let config = Config::from_lookup(|key| {
            (key == "STORAGE_BACKEND").then(|| "memory".to_string())
        })
        .unwrap();
        let state = AppState::new(
            ResumeDocument::default(),
            persistence,
            Box::new(FixedSequence::new(vec![0, 1, 2])),
            config,
        );
        (build_router(state), store)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn import_request(contents: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"resume.json\"\r\n\
             Content-Type: application/json\r\n\r\n\
             {contents}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/document/import")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn current_document(app: &Router) -> Value {
        body_json(send(app, empty_request(Method::GET, "/api/v1/document")).await).await
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let response = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_patch_skills_filters_and_renders() {
        let (app, _) = test_app();
        let response = send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/document",
                json!({"op": "set_skills", "text": "JavaScript, React,  , CSS"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["document"]["skills"], json!(["JavaScript", "React", "CSS"]));
        let html = body["preview_html"].as_str().unwrap();
        assert!(html.contains(r#"<span class="skill-pill">CSS</span>"#));
    }

    #[tokio::test]
    async fn test_no_jobs_scenario() {
        let (app, _) = test_app();
        send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/document",
                json!({"op": "set_field", "field": "fullName", "value": "Jane Doe"}),
            ),
        )
        .await;
        let response = send(&app, empty_request(Method::DELETE, "/api/v1/jobs/0")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["document"]["jobs"], json!([]));
        let html = body["preview_html"].as_str().unwrap();
        assert!(html.contains(EXPERIENCE_PLACEHOLDER));
        assert!(html.contains(r#"<div class="avatar">JD</div>"#));
    }

    #[tokio::test]
    async fn test_job_routes() {
        let (app, _) = test_app();
        let response = send(&app, empty_request(Method::POST, "/api/v1/jobs")).await;
        assert_eq!(body_json(response).await["document"]["jobs"][1]["title"], "Job Title");

        let response = send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/jobs/1",
                json!({"field": "end", "value": ""}),
            ),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["document"]["jobs"][1]["end"], "");
        assert!(body["preview_html"]
            .as_str()
            .unwrap()
            .contains("2020 — Present"));
    }

    #[tokio::test]
    async fn test_missing_job_is_404_and_unchanged() {
        let (app, _) = test_app();
        let before = current_document(&app).await;
        let response = send(&app, empty_request(Method::DELETE, "/api/v1/jobs/9")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
        assert_eq!(current_document(&app).await, before);
    }

    #[tokio::test]
    async fn test_clear_summary() {
        let (app, _) = test_app();
        let response = send(&app, empty_request(Method::POST, "/api/v1/summary/clear")).await;
        let body = body_json(response).await;
        assert_eq!(body["document"]["summary"], "");
        assert!(body["preview_html"]
            .as_str()
            .unwrap()
            .contains("Add a short professional summary"));
    }

    #[tokio::test]
    async fn test_import_invalid_json_leaves_document_unchanged() {
        let (app, _) = test_app();
        let before = current_document(&app).await;
        let response = send(&app, import_request("{\"fullName\": ")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_IMPORT");
        assert_eq!(body["error"]["message"], "Invalid JSON file");
        assert_eq!(current_document(&app).await, before);
    }

    #[tokio::test]
    async fn test_import_replaces_top_level_keys() {
        let (app, _) = test_app();
        let response = send(
            &app,
            import_request(r#"{"fullName": "Grace Hopper", "skills": ["COBOL"], "jobs": []}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = current_document(&app).await;
        assert_eq!(doc["fullName"], "Grace Hopper");
        assert_eq!(doc["skills"], json!(["COBOL"]));
        assert_eq!(doc["jobs"], json!([]));
        assert_eq!(doc["role"], "Frontend Developer");
    }

    #[tokio::test]
    async fn test_import_without_file_field() {
        let (app, _) = test_app();
        let body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{BOUNDARY}--\r\n");
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/document/import")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_download() {
        let (app, _) = test_app();
        let response = send(&app, empty_request(Method::GET, "/api/v1/document/export")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Jane Doe.json\""));
        let text = body_text(response).await;
        let doc: ResumeDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(doc, ResumeDocument::default());
    }

    #[tokio::test]
    async fn test_save_writes_current_document() {
        let (app, store) = test_app();
        send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/document",
                json!({"op": "set_template", "template": "modern"}),
            ),
        )
        .await;
        let response = send(&app, empty_request(Method::POST, "/api/v1/document/save")).await;
        assert_eq!(body_json(response).await["saved"], true);

        let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let saved: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved, current_document(&app).await);
        assert_eq!(saved["template"], "modern");
    }

    #[tokio::test]
    async fn test_reset_clears_storage_and_restores_defaults() {
        let (app, store) = test_app();
        send(&app, empty_request(Method::POST, "/api/v1/summary/clear")).await;
        send(&app, empty_request(Method::POST, "/api/v1/document/save")).await;

        let response = send(&app, empty_request(Method::POST, "/api/v1/document/reset")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), None);
        let doc: ResumeDocument = serde_json::from_value(current_document(&app).await).unwrap();
        assert_eq!(doc, ResumeDocument::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_are_autosaved_after_debounce() {
        let (app, store) = test_app();
        for name in ["A", "Ad", "Ada"] {
            send(
                &app,
                json_request(
                    Method::PATCH,
                    "/api/v1/document",
                    json!({"op": "set_field", "field": "fullName", "value": name}),
                ),
            )
            .await;
        }
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), None);

        tokio::time::sleep(Duration::from_millis(801)).await;
        let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let saved: ResumeDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.full_name, "Ada");
    }

    #[tokio::test(start_paused = true)]
    async fn test_template_change_saves_without_debounce() {
        let (app, store) = test_app();
        let response = send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/document",
                json!({"op": "set_template", "template": "minimal"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let saved: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved["template"], "minimal");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_is_not_undone_by_earlier_edit() {
        let (app, store) = test_app();
        send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/document",
                json!({"op": "set_field", "field": "fullName", "value": "Ada"}),
            ),
        )
        .await;
        send(&app, empty_request(Method::POST, "/api/v1/document/reset")).await;

        // The edit's save was dropped; only the defaults get written back.
        tokio::time::sleep(Duration::from_secs(2)).await;
        let raw = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let saved: ResumeDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved, ResumeDocument::default());
    }

    #[tokio::test]
    async fn test_generate_summary() {
        let (app, _) = test_app();
        let response = send(&app, empty_request(Method::POST, "/api/v1/generate/summary")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        let summary = body["document"]["summary"].as_str().unwrap();
        assert_eq!(body["generated"]["summary"], summary);
        assert!(summary.starts_with("Frontend Developer with 1+ years of experience"));
        let generated = body["generated"]["bullets"].as_array().unwrap();
        assert!(!generated.is_empty() && generated.len() <= 5);
        assert_eq!(body["document"]["jobs"][0]["bullets"][0], generated[0]);
    }

    #[tokio::test]
    async fn test_enhance_missing_job() {
        let (app, _) = test_app();
        let response = send(&app, empty_request(Method::POST, "/api/v1/jobs/4/enhance")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_preview_page_and_debug_view() {
        let (app, _) = test_app();
        let page = body_text(send(&app, empty_request(Method::GET, "/api/v1/preview")).await).await;
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<body class="template-classic">"#));
        assert!(!page.contains(r#"<pre class="raw">"#));

        let page = body_text(
            send(&app, empty_request(Method::GET, "/api/v1/preview?debug=true")).await,
        )
        .await;
        assert!(page.contains(r#"<pre class="raw">"#));
        assert!(page.contains("&quot;fullName&quot;: &quot;Jane Doe&quot;"));
    }

    #[tokio::test]
    async fn test_preview_tree_and_raw_view() {
        let (app, _) = test_app();
        let tree = body_json(send(&app, empty_request(Method::GET, "/api/v1/preview/tree")).await)
            .await;
        assert_eq!(tree["header"]["initials"], "JD");
        assert_eq!(tree["accent"], "#0b6efd");

        let raw = body_text(send(&app, empty_request(Method::GET, "/api/v1/document/raw")).await)
            .await;
        assert!(raw.contains("\n  \"fullName\": \"Jane Doe\""));
    }
}
