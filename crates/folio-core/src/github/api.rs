use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;

/// Raw calls against the source-hosting REST API.
///
/// Implementations:
/// - `GithubClient`: reqwest against `api.github.com` (or a configured base URL)
/// - `FakeGithub` (tests only): canned responses, no network
pub trait GithubApi: Send + Sync {
    /// `GET /users/{username}/repos`
    fn list_repos(&self, username: &str)
        -> impl std::future::Future<Output = Result<Vec<RawRepo>>> + Send;

    /// `GET /repos/{owner}/{repo}/topics`
    fn repo_topics(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    /// `GET /users/{username}/events?page={page}`, newest first.
    fn events_page(
        &self,
        username: &str,
        page: u32,
    ) -> impl std::future::Future<Output = Result<Vec<RawEvent>>> + Send;

    /// `GET /repos/{owner}/{repo}/languages`: bytes per language.
    fn repo_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl std::future::Future<Output = Result<BTreeMap<String, u64>>> + Send;

    /// Whether requests carry a credential (enables per-repository enrichment).
    fn has_credential(&self) -> bool;
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub homepage: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub owner: Option<RawOwner>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub repo: Option<RawEventRepo>,
    #[serde(default)]
    pub payload: RawPayload,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub commits: Option<Vec<serde_json::Value>>,
    /// Newer payloads may omit `commits` and only report a size.
    #[serde(default)]
    pub size: Option<u32>,
}

impl RawPayload {
    pub fn commit_count(&self) -> u32 {
        match (&self.commits, self.size) {
            (Some(commits), _) => u32::try_from(commits.len()).unwrap_or(u32::MAX),
            (None, Some(size)) => size,
            (None, None) => 0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TopicsResponse {
    #[serde(default)]
    pub names: Vec<String>,
}
