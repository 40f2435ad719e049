use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use folio_core::mail::{ContactSubmission, NOT_CONFIGURED_MESSAGE};
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/contact", post(send_contact))
        .route("/contact", post(send_contact))
}

// -- Request/Response types --

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    pub id: String,
}

// -- Handlers --

async fn send_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(submission) =
        payload.map_err(|e| ApiError::bad_request(format!("invalid request body: {}", e.body_text())))?;

    // reject bad input before looking at the mail provider
    let contact = submission.validate()?;

    let mail = state
        .mail
        .as_ref()
        .ok_or_else(|| ApiError::internal(NOT_CONFIGURED_MESSAGE))?;

    let id = mail.send_contact(&contact).await?;
    Ok(Json(ContactResponse { ok: true, id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use folio_core::content::PortfolioContent;
    use folio_core::mail::REQUIRED_FIELDS_MESSAGE;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mail_enabled_state(base_url: &str) -> Arc<AppState> {
        let mut config = test_config(base_url);
        config.mail.api_key = Some("re_test".into());
        config.mail.to = Some("owner@example.com".into());
        test_app_state(config, PortfolioContent::default())
    }

    async fn post_json(
        app: axum::Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        (status, body_json(resp.into_body()).await)
    }

    #[tokio::test]
    async fn test_contact_sends_mail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "msg_9"})))
            .expect(1)
            .mount(&server)
            .await;

        let app = test_router(mail_enabled_state(&server.uri()));
        let (status, json) = post_json(
            app,
            "/api/contact",
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "subject": "Hello",
                "message": "Nice site",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        assert_eq!(json["id"], "msg_9");
    }

    #[tokio::test]
    async fn test_contact_missing_message_rejected_before_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})))
            .expect(0)
            .mount(&server)
            .await;

        let app = test_router(mail_enabled_state(&server.uri()));
        let (status, json) = post_json(
            app,
            "/api/contact",
            serde_json::json!({ "name": "Ada", "email": "ada@example.com" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], REQUIRED_FIELDS_MESSAGE);
    }

    #[tokio::test]
    async fn test_contact_not_configured_is_500() {
        let app = test_router(test_app_state(
            test_config("http://127.0.0.1:9"),
            PortfolioContent::default(),
        ));
        let (status, json) = post_json(
            app,
            "/contact",
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "message": "hi",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], NOT_CONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn test_contact_provider_failure_is_500_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "statusCode": 429,
                "message": "Too many requests",
            })))
            .mount(&server)
            .await;

        let app = test_router(mail_enabled_state(&server.uri()));
        let (status, json) = post_json(
            app,
            "/api/contact",
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "message": "hi",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Too many requests");
    }

    #[tokio::test]
    async fn test_contact_malformed_body_is_400() {
        let app = test_router(mail_enabled_state("http://127.0.0.1:9"));
        let req = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp.into_body()).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body"));
    }
}
