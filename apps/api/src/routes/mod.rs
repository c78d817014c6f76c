pub mod health;
pub mod ui;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(ui::options_handler))
        // Company Details view
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route("/api/v1/sessions/:id", get(session::handle_get_session))
        .route(
            "/api/v1/sessions/:id/profile",
            put(session::handle_save_profile),
        )
        // Content Generation view
        .route(
            "/api/v1/sessions/:id/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/generate/stream",
            post(generation::handle_generate_stream),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::generator::tests::{text_reply, ScriptedGenerator};
    use crate::generation::generator::MISSING_RESULTS_NOTICE;
    use crate::llm_client::LlmError;
    use crate::session::SessionStore;

    fn app(generator: Arc<ScriptedGenerator>) -> (Router, SessionStore) {
        let sessions = SessionStore::new();
        let state = AppState {
            llm: generator,
            sessions: sessions.clone(),
            reveal_delay: Duration::ZERO,
        };
        (build_router(state), sessions)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ad_copy() -> Value {
        json!({
            "kind": "Ad Copy",
            "product_name": "SolarKit",
            "product_description": "Rooftop panels",
            "product_audience": "Parents",
            "product_features": "Cuts bills in half"
        })
    }

    fn profile() -> Value {
        json!({
            "name": "Sunny Ltd",
            "industry": "Other",
            "target_audience": "B2C",
            "brand_voice": "Casual",
            "key_products": "Solar"
        })
    }

    #[tokio::test]
    async fn test_save_profile_then_generate() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            text_reply("Buy\nnow"),
            text_reply("Tips"),
        ]));
        let (app, sessions) = app(generator.clone());
        let id = sessions.create().id;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/v1/sessions/{id}/profile"),
                profile(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Company details saved successfully!");
        assert_eq!(body["session"]["profile"]["name"], "Sunny Ltd");

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/generate"),
                ad_copy(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["content"]["type"], "rendered");
        assert_eq!(body["content"]["heading"], "Generated Ad Copy");
        assert_eq!(body["content"]["text"], "Buy\n\nnow");
        assert_eq!(body["recommendations"]["text"], "Tips");

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Sunny Ltd"));
        assert!(prompts[0].contains("casual voice"));
        assert!(prompts[1].contains("Other industry"));

        assert!(sessions.get(id).unwrap().last_request.is_some());
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_banner() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(LlmError::Upstream {
            status: 401,
            body: "unauthorized".to_string(),
        })]));
        let (app, sessions) = app(generator.clone());
        let id = sessions.create().id;

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/generate"),
                ad_copy(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Error: 401 , unauthorized. Please try again or contact support."
        );
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let (app, _) = app(Arc::new(ScriptedGenerator::new(vec![])));
        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{}/generate", uuid::Uuid::new_v4()),
                ad_copy(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_out_of_range_age_is_rejected_before_calling() {
        let generator = Arc::new(ScriptedGenerator::new(vec![]));
        let (app, sessions) = app(generator.clone());
        let id = sessions.create().id;

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/generate"),
                json!({"kind": "Email", "customer_name": "Kid", "customer_age": 12}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_stream_emits_reveal_frames_and_notices() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            text_reply("ab"),
            Ok(json!({"nothing": true})),
        ]));
        let (app, sessions) = app(generator);
        let id = sessions.create().id;

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/generate/stream"),
                ad_copy(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        let status_at = text.find("event: status").unwrap();
        let heading_at = text.find("event: heading").unwrap();
        let first_frame = text.find(r#""text":"a""#).unwrap();
        let second_frame = text.find(r#""text":"ab""#).unwrap();
        let notice_at = text.find("event: notice").unwrap();
        let done_at = text.find("event: done").unwrap();

        assert!(status_at < heading_at);
        assert!(heading_at < first_frame);
        assert!(first_frame < second_frame);
        assert!(second_frame < notice_at);
        assert!(notice_at < done_at);
        assert!(text.contains(MISSING_RESULTS_NOTICE));
    }

    #[tokio::test]
    async fn test_stream_reveals_content_before_recommendation_failure() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            text_reply("PostBody"),
            Err(LlmError::Upstream {
                status: 500,
                body: "overloaded".to_string(),
            }),
        ]));
        let (app, sessions) = app(generator.clone());
        let id = sessions.create().id;

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/generate/stream"),
                ad_copy(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        let full_content = text.find(r#""text":"PostBody""#).unwrap();
        let second_status = text.find("Generating recommendations...").unwrap();
        let failure = text
            .find(r#""message":"Error: 500 , overloaded. Please try again or contact support.""#)
            .unwrap();
        let done_at = text.find("event: done").unwrap();

        assert!(full_content < second_status);
        assert!(second_status < failure);
        assert!(failure < done_at);
        assert!(text[second_status..failure].contains("event: error"));
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_json_generate_keeps_content_when_recommendations_fail() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            text_reply("PostBody"),
            Err(LlmError::Upstream {
                status: 500,
                body: "overloaded".to_string(),
            }),
        ]));
        let (app, sessions) = app(generator);
        let id = sessions.create().id;

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/generate"),
                ad_copy(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["content"]["text"], "PostBody");
        assert_eq!(body["recommendations"]["type"], "failed");
        assert_eq!(
            body["recommendations"]["message"],
            "Error: 500 , overloaded. Please try again or contact support."
        );
    }

    #[tokio::test]
    async fn test_stream_content_failure_skips_recommendations() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(LlmError::Upstream {
            status: 401,
            body: "unauthorized".to_string(),
        })]));
        let (app, sessions) = app(generator.clone());
        let id = sessions.create().id;

        let response = app
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/generate/stream"),
                ad_copy(),
            ))
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(text.contains("event: error"));
        assert!(text.contains("Error: 401 , unauthorized"));
        assert!(!text.contains("Generating recommendations..."));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_page_falls_back_to_plain_text_errors() {
        let (app, _) = app(Arc::new(ScriptedGenerator::new(vec![])));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("async function errorMessage(response)"));
        assert!(page.contains("await response.text()"));
        assert!(!page.contains("body.error.message"));
    }

    #[tokio::test]
    async fn test_options_list_form_choices() {
        let (app, _) = app(Arc::new(ScriptedGenerator::new(vec![])));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/options")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["audiences"][3], "Gen Z");
        assert_eq!(
            body["content_kinds"],
            json!(["Social Media Post", "Email", "Ad Copy"])
        );
        assert_eq!(body["customer_age"], json!([18, 100]));
    }
}
