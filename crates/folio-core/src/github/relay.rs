use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{FolioError, Result};
use crate::model::{dedup_by_id, Project};

/// Client for a relay service that performs repository enrichment server-side
/// and answers `GET /repos?username=` with `{ "projects": [...] }`.
#[derive(Debug)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct RelayResponse {
    projects: Vec<serde_json::Value>,
}

impl RelayClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_projects(&self, username: &str) -> Result<Vec<Project>> {
        let url = Url::parse_with_params(
            &format!("{}/repos", self.base_url),
            &[("username", username)],
        )
        .map_err(|e| FolioError::Config(format!("invalid relay url: {e}")))?;

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(FolioError::Upstream {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body: RelayResponse = response.json().await?;
        let projects = body
            .projects
            .into_iter()
            .filter_map(|item| match decode_project(item) {
                Ok(project) => Some(project),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed relay project");
                    None
                }
            })
            .collect();
        Ok(dedup_by_id(projects))
    }
}

fn decode_project(item: serde_json::Value) -> Result<Project> {
    Ok(serde_json::from_value(item)?)
}
