use chrono::{DateTime, Utc};

use crate::config::{CommitCounting, FolioConfig, ImageConfig};
use crate::error::Result;
use crate::github::api::GithubApi;
use crate::github::client::GithubClient;
use crate::github::events::fetch_events;
use crate::github::languages::aggregate_languages;
use crate::github::repos::{fetch_projects, RepoStrategy};
use crate::model::{ActivityEvent, LanguageTotal, Project};

/// Fetchers bound to one resolved configuration. Built once at startup.
pub struct GithubService<A: GithubApi = GithubClient> {
    api: A,
    strategy: RepoStrategy,
    images: ImageConfig,
    max_event_pages: u32,
    commit_counting: CommitCounting,
}

impl<A: GithubApi> std::fmt::Debug for GithubService<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubService")
            .field("strategy", &self.strategy.name())
            .field("max_event_pages", &self.max_event_pages)
            .finish()
    }
}

impl GithubService<GithubClient> {
    pub fn from_config(config: &FolioConfig) -> Result<Self> {
        let api = GithubClient::from_config(&config.github)?;
        let strategy = RepoStrategy::from_config(&config.github, api.has_credential())?;
        Ok(Self::new(api, strategy, config))
    }
}

impl<A: GithubApi> GithubService<A> {
    pub fn new(api: A, strategy: RepoStrategy, config: &FolioConfig) -> Self {
        Self {
            api,
            strategy,
            images: config.images.clone(),
            max_event_pages: config.github.max_event_pages.max(1),
            commit_counting: config.github.commit_counting,
        }
    }

    /// `"relay"`, `"direct-enriched"` or `"direct"`.
    pub fn mode(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn commit_counting(&self) -> CommitCounting {
        self.commit_counting
    }

    pub async fn projects(&self, username: &str) -> Result<Vec<Project>> {
        fetch_projects(&self.api, &self.strategy, &self.images, username).await
    }

    pub async fn events(&self, username: &str, now: DateTime<Utc>) -> Vec<ActivityEvent> {
        fetch_events(&self.api, username, self.max_event_pages, now).await
    }

    pub async fn languages(&self, owner: &str, repo_names: &[String]) -> Vec<LanguageTotal> {
        aggregate_languages(&self.api, owner, repo_names).await
    }
}
