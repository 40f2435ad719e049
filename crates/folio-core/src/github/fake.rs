use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};

use crate::error::{FolioError, Result};
use crate::github::api::{GithubApi, RawEvent, RawRepo};

/// In-memory `GithubApi` with canned responses and call counters.
#[derive(Default)]
pub(crate) struct FakeGithub {
    pub repos: Vec<RawRepo>,
    pub fail_repos: bool,
    pub topics: HashMap<String, Vec<String>>,
    /// Page N (1-based) is `event_pages[N - 1]`; `None` simulates a failing page.
    pub event_pages: Vec<Option<Vec<RawEvent>>>,
    /// Repos missing from this map fail their language lookup.
    pub languages: HashMap<String, BTreeMap<String, u64>>,
    pub credential: bool,
    pub event_page_calls: AtomicUsize,
    pub topic_calls: AtomicUsize,
    pub language_calls: AtomicUsize,
}

impl FakeGithub {
    pub fn event_page_calls(&self) -> usize {
        self.event_page_calls.load(Ordering::SeqCst)
    }

    pub fn topic_calls(&self) -> usize {
        self.topic_calls.load(Ordering::SeqCst)
    }

    pub fn language_calls(&self) -> usize {
        self.language_calls.load(Ordering::SeqCst)
    }
}

fn unavailable(what: &str) -> FolioError {
    FolioError::Upstream {
        status: 503,
        url: format!("fake://{what}"),
    }
}

impl GithubApi for FakeGithub {
    async fn list_repos(&self, _username: &str) -> Result<Vec<RawRepo>> {
        if self.fail_repos {
            return Err(unavailable("repos"));
        }
        Ok(self.repos.clone())
    }

    async fn repo_topics(&self, _owner: &str, repo: &str) -> Result<Vec<String>> {
        self.topic_calls.fetch_add(1, Ordering::SeqCst);
        self.topics
            .get(repo)
            .cloned()
            .ok_or_else(|| unavailable("topics"))
    }

    async fn events_page(&self, _username: &str, page: u32) -> Result<Vec<RawEvent>> {
        self.event_page_calls.fetch_add(1, Ordering::SeqCst);
        match self.event_pages.get(page as usize - 1) {
            Some(Some(events)) => Ok(events.clone()),
            Some(None) => Err(unavailable("events")),
            None => Ok(Vec::new()),
        }
    }

    async fn repo_languages(&self, _owner: &str, repo: &str) -> Result<BTreeMap<String, u64>> {
        self.language_calls.fetch_add(1, Ordering::SeqCst);
        self.languages
            .get(repo)
            .cloned()
            .ok_or_else(|| unavailable("languages"))
    }

    fn has_credential(&self) -> bool {
        self.credential
    }
}

// -- Builders for raw upstream records --

pub(crate) fn raw_repo(owner: &str, name: &str) -> RawRepo {
    RawRepo {
        id: stable_id(owner, name),
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        description: None,
        fork: false,
        archived: false,
        private: false,
        disabled: false,
        stargazers_count: 0,
        forks_count: 0,
        language: None,
        pushed_at: None,
        updated_at: None,
        homepage: None,
        html_url: format!("https://github.com/{owner}/{name}"),
        owner: Some(crate::github::api::RawOwner {
            login: owner.to_string(),
        }),
    }
}

pub(crate) fn raw_push(repo: &str, commits: usize, at: DateTime<Utc>) -> RawEvent {
    serde_json::from_value(serde_json::json!({
        "type": "PushEvent",
        "repo": { "name": repo },
        "payload": {
            "ref": "refs/heads/main",
            "commits": vec![serde_json::json!({}); commits],
        },
        "created_at": at,
    }))
    .unwrap()
}

pub(crate) fn raw_event(kind: &str, repo: &str, at: DateTime<Utc>) -> RawEvent {
    serde_json::from_value(serde_json::json!({
        "type": kind,
        "repo": { "name": repo },
        "payload": {},
        "created_at": at,
    }))
    .unwrap()
}

fn stable_id(owner: &str, name: &str) -> u64 {
    format!("{owner}/{name}")
        .bytes()
        .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}
