//! Turns a user's public repositories into project cards.

use futures::future::join_all;

use crate::config::{GithubConfig, ImageConfig};
use crate::error::Result;
use crate::github::api::{GithubApi, RawRepo};
use crate::github::relay::RelayClient;
use crate::model::{Project, ProjectStatus};

/// Category given to every project built from a repository.
pub const REPO_CATEGORY: &str = "GitHub";

/// Where repository listings come from. Chosen once from configuration.
#[derive(Debug)]
pub enum RepoStrategy {
    /// A relay performs the upstream calls and returns finished projects.
    Relay(RelayClient),
    /// Direct REST calls. `enrich` adds per-repository topic lookups and is
    /// only enabled when a credential is available.
    Direct { enrich: bool },
}

impl RepoStrategy {
    pub fn from_config(config: &GithubConfig, credentialed: bool) -> Result<Self> {
        match config.relay_base() {
            Some(base) => Ok(Self::Relay(RelayClient::new(&base, &config.user_agent)?)),
            None => Ok(Self::Direct {
                enrich: credentialed,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Relay(_) => "relay",
            Self::Direct { enrich: true } => "direct-enriched",
            Self::Direct { enrich: false } => "direct",
        }
    }
}

/// Fetch the user's projects.
///
/// Relay mode never fails: a relay error is logged and yields an empty list.
/// Direct mode propagates a failed listing; failed topic lookups only leave
/// that repository without topic tags.
pub async fn fetch_projects<A: GithubApi>(
    api: &A,
    strategy: &RepoStrategy,
    images: &ImageConfig,
    username: &str,
) -> Result<Vec<Project>> {
    match strategy {
        RepoStrategy::Relay(relay) => match relay.fetch_projects(username).await {
            Ok(projects) => Ok(projects),
            Err(e) => {
                tracing::warn!(relay = relay.base_url(), error = %e, "relay fetch failed");
                Ok(Vec::new())
            }
        },
        RepoStrategy::Direct { enrich } => {
            let repos: Vec<RawRepo> = api
                .list_repos(username)
                .await?
                .into_iter()
                .filter(|r| !r.private && !r.disabled)
                .collect();

            let topics = if *enrich {
                let lookups = repos.iter().map(|repo| async move {
                    let owner = repo
                        .owner
                        .as_ref()
                        .map(|o| o.login.as_str())
                        .unwrap_or(username);
                    match api.repo_topics(owner, &repo.name).await {
                        Ok(topics) => topics,
                        Err(e) => {
                            tracing::debug!(repo = %repo.full_name, error = %e, "topic lookup failed");
                            Vec::new()
                        }
                    }
                });
                join_all(lookups).await
            } else {
                vec![Vec::new(); repos.len()]
            };

            Ok(repos
                .iter()
                .zip(topics)
                .map(|(repo, topics)| normalize_repo(repo, &topics, images))
                .collect())
        }
    }
}

/// Build a project card from repository metadata and its topics.
pub fn normalize_repo(repo: &RawRepo, topics: &[String], images: &ImageConfig) -> Project {
    let mut tags: Vec<String> = topics
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(hash_tag)
        .collect();

    if let Some(ref language) = repo.language {
        let tag = hash_tag(&language.to_lowercase());
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    let status = if repo.archived {
        ProjectStatus::Archived
    } else {
        ProjectStatus::Active
    };

    let last_update = repo
        .pushed_at
        .or(repo.updated_at)
        .map(|ts| ts.date_naive())
        .unwrap_or_default();

    let demo = repo
        .homepage
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from);

    Project {
        id: repo.id.to_string(),
        name: repo.name.clone(),
        description: repo.description.clone().filter(|d| !d.trim().is_empty()),
        status,
        category: REPO_CATEGORY.to_string(),
        tags,
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        language: repo.language.clone(),
        last_update,
        demo,
        github: Some(repo.html_url.clone()),
        image: Some(images.image_for(&repo.full_name, &repo.name)),
        features: Vec::new(),
        is_fork: repo.fork,
    }
}

fn hash_tag(tag: &str) -> String {
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{tag}")
    }
}
