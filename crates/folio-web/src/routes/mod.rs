pub mod contact;
pub mod content;
pub mod github;

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::error::ApiError;
use crate::AppState;

/// API routes. Unmatched paths are served from `static_dir` when given,
/// otherwise they get a JSON 404.
pub fn router(static_dir: Option<&Path>) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/health", get(health))
        .merge(github::routes())
        .merge(content::routes())
        .merge(contact::routes());

    match static_dir {
        Some(dir) => {
            router.fallback_service(ServeDir::new(dir).not_found_service(not_found.into_service()))
        }
        None => router.fallback(not_found),
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "github_mode": state.github.mode(),
        "mail_configured": state.mail.is_some(),
    }))
}

async fn not_found() -> impl IntoResponse {
    ApiError::not_found("not found")
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use axum::body::Body;
    use folio_core::config::FolioConfig;
    use folio_core::content::PortfolioContent;
    use folio_core::github::GithubService;
    use folio_core::mail::MailService;
    use http_body_util::BodyExt;

    use crate::AppState;

    /// Config pointing every upstream at `base_url`, with no ambient secrets.
    pub fn test_config(base_url: &str) -> FolioConfig {
        let mut config = FolioConfig::default_config();
        config.github.api_base_url = base_url.to_string();
        config.github.token_env_var = Some("FOLIO_TEST_GITHUB_TOKEN_UNSET".into());
        config.mail.env_var = Some("FOLIO_TEST_MAIL_KEY_UNSET".into());
        config.mail.base_url = base_url.to_string();
        config
    }

    pub fn test_app_state(config: FolioConfig, content: PortfolioContent) -> Arc<AppState> {
        let github = GithubService::from_config(&config).unwrap();
        let mail = MailService::from_config(&config.mail);
        Arc::new(AppState {
            config,
            github,
            mail,
            content,
        })
    }

    pub fn test_router(state: Arc<AppState>) -> axum::Router {
        crate::routes::router(None).with_state(state)
    }

    pub async fn body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
