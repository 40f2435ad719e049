use std::collections::BTreeMap;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::GithubConfig;
use crate::error::{FolioError, Result};
use crate::github::api::{GithubApi, RawEvent, RawRepo, TopicsResponse};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const PER_PAGE: u32 = 100;

/// GitHub REST client. Sends the bearer token when one is configured.
pub struct GithubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url)
            .field("credentialed", &self.token.is_some())
            .finish()
    }
}

impl GithubClient {
    pub fn new(base_url: &str, user_agent: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &GithubConfig) -> Result<Self> {
        Self::new(
            config.api_base(),
            &config.user_agent,
            config.resolved_token(),
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FolioError::Upstream {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl GithubApi for GithubClient {
    async fn list_repos(&self, username: &str) -> Result<Vec<RawRepo>> {
        self.get_json(&format!(
            "/users/{username}/repos?per_page={PER_PAGE}&sort=updated"
        ))
        .await
    }

    async fn repo_topics(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let topics: TopicsResponse = self
            .get_json(&format!("/repos/{owner}/{repo}/topics"))
            .await?;
        Ok(topics.names)
    }

    async fn events_page(&self, username: &str, page: u32) -> Result<Vec<RawEvent>> {
        self.get_json(&format!(
            "/users/{username}/events?per_page={PER_PAGE}&page={page}"
        ))
        .await
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<BTreeMap<String, u64>> {
        self.get_json(&format!("/repos/{owner}/{repo}/languages"))
            .await
    }

    fn has_credential(&self) -> bool {
        self.token.is_some()
    }
}
