use std::sync::{Arc, LazyLock};

use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::{Local, Utc};
use folio_core::model::{Project, Summary};
use folio_core::summary::SummaryBuilder;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

// GitHub handles: alphanumerics and single hyphens, no leading or trailing hyphen.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,37}[A-Za-z0-9])?$").unwrap());

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/github/projects", get(projects))
        .route("/api/github/summary", get(summary))
}

// -- Request/Response types --

#[derive(Debug, Default, Deserialize)]
pub struct UsernameQuery {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub username: String,
    pub projects: Vec<Project>,
}

/// The requested username, or the configured one when the request names none.
pub(crate) fn resolve_username(
    query: &UsernameQuery,
    state: &AppState,
) -> Result<String, ApiError> {
    let username = query
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .or_else(|| {
            state
                .config
                .github
                .username
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
        })
        .ok_or_else(|| ApiError::bad_request("username is required"))?;

    if !is_valid_username(username) {
        return Err(ApiError::bad_request(format!("invalid username: {username}")));
    }
    Ok(username.to_string())
}

fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username) && !username.contains("--")
}

// -- Handlers --

async fn projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let username = resolve_username(&query, &state)?;
    let projects = state.github.projects(&username).await?;
    Ok(Json(ProjectsResponse { username, projects }))
}

async fn summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<Summary>, ApiError> {
    let username = resolve_username(&query, &state)?;
    let summary = SummaryBuilder::new(&state.github, Local)
        .build(&username, Utc::now())
        .await;
    Ok(Json(summary))
}
