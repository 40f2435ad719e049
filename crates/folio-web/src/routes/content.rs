use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use folio_core::content::{Profile, Resume};
use folio_core::model::{merge_projects, Project};
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::github::{resolve_username, UsernameQuery};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/projects", get(projects))
        .route("/api/content", get(content))
}

// -- Request/Response types --

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub profile: Profile,
    pub resume: Resume,
}

// -- Handlers --

/// Seeded personal projects followed by fetched repositories.
///
/// With no username in the request or config only the seed is returned, and a
/// failed fetch degrades to the seed as well.
async fn projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let seed = &state.content.personal_projects;

    let named = |u: &Option<String>| u.as_deref().is_some_and(|u| !u.trim().is_empty());
    if !named(&query.username) && !named(&state.config.github.username) {
        return Ok(Json(ProjectListResponse {
            projects: seed.clone(),
        }));
    }

    let username = resolve_username(&query, &state)?;
    let fetched = match state.github.projects(&username).await {
        Ok(fetched) => fetched,
        Err(e) => {
            tracing::warn!(username = %username, error = %e, "project fetch failed, serving seeded projects");
            Vec::new()
        }
    };

    Ok(Json(ProjectListResponse {
        projects: merge_projects(seed, fetched),
    }))
}

async fn content(State(state): State<Arc<AppState>>) -> Json<ContentResponse> {
    Json(ContentResponse {
        profile: state.content.profile.clone(),
        resume: state.content.resume.clone(),
    })
}
