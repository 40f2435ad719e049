use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of public activity event. Unknown upstream types are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Push,
    PullRequest,
    Create,
    Watch,
    Other(String),
}

impl EventKind {
    /// Map an upstream type name (`PushEvent`, `WatchEvent`, ...) to a kind.
    pub fn from_upstream(raw: &str) -> Self {
        match raw {
            "PushEvent" => Self::Push,
            "PullRequestEvent" => Self::PullRequest,
            "CreateEvent" => Self::Create,
            "WatchEvent" => Self::Watch,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Push => "push",
            Self::PullRequest => "pull-request",
            Self::Create => "create",
            Self::Watch => "watch",
            Self::Other(raw) => raw,
        }
    }

    /// Phrase used in the activity feed, e.g. "pushed commits to".
    pub fn action_phrase(&self) -> &str {
        match self {
            Self::Push => "pushed commits to",
            Self::PullRequest => "opened pull request in",
            Self::Create => "created",
            Self::Watch => "starred",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "push" => Self::Push,
            "pull-request" => Self::PullRequest,
            "create" => Self::Create,
            "watch" => Self::Watch,
            _ => Self::from_upstream(&s),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized public activity event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub repo_name: String,
    pub repo_url: String,
    /// Only set for push events.
    pub branch: Option<String>,
    /// Commits carried by this event's payload; 0 for non-push events.
    pub commits: u32,
    pub created_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn is_push(&self) -> bool {
        self.kind == EventKind::Push
    }

    /// Whether the event happened in one of `username`'s own repositories.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.repo_name
            .strip_prefix(username)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Repository name without the owner, or the full name when there is no owner part.
    pub fn short_repo_name(&self) -> &str {
        match self.repo_name.split_once('/') {
            Some((_, name)) if !name.is_empty() => name,
            _ => &self.repo_name,
        }
    }
}
