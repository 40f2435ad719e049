mod error;
mod routes;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use folio_core::config::FolioConfig;
use folio_core::content::PortfolioContent;
use folio_core::github::GithubService;
use folio_core::mail::MailService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub config: FolioConfig,
    pub github: GithubService,
    pub mail: Option<MailService>,
    pub content: PortfolioContent,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_web=info,folio_core=info".parse().unwrap()),
        )
        .init();

    let cwd = std::env::current_dir().ok();
    let config = FolioConfig::load(cwd.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("failed to load config, using defaults: {e}");
        FolioConfig::default_config()
    });

    let github = GithubService::from_config(&config).context("failed to build GitHub client")?;
    let mail = MailService::from_config(&config.mail);
    if mail.is_none() {
        tracing::info!("no mail API key configured, contact form is disabled");
    }
    let content = PortfolioContent::load(&config.content)?;

    tracing::info!(
        github_mode = github.mode(),
        username = config.github.username.as_deref().unwrap_or("<unset>"),
        "folio-web starting"
    );

    let cors = cors_layer(&config.web.cors_allow_origin)?;
    let static_dir = config.web.static_dir.clone();
    let addr = format!("{}:{}", config.web.host, config.web.port);

    let state = Arc::new(AppState {
        config,
        github,
        mail,
        content,
    });

    let app = routes::router(static_dir.as_deref().map(Path::new))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!("folio-web listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `"*"` allows any origin; anything else must be a single exact origin.
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let origin = origin.trim();
    if origin.is_empty() || origin == "*" {
        return Ok(layer.allow_origin(Any));
    }
    let value = HeaderValue::from_str(origin)
        .with_context(|| format!("invalid web.cors_allow_origin: {origin}"))?;
    Ok(layer.allow_origin(value))
}
