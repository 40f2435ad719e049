//! Recent public activity, newest first.

use chrono::{DateTime, Duration, Utc};

use crate::github::api::{GithubApi, RawEvent};
use crate::model::{ActivityEvent, EventKind};

/// Paging stops once a page reaches further back than this.
pub const ACTIVITY_WINDOW_DAYS: i64 = 7;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Fetch up to `max_pages` pages of public events, sequentially.
///
/// Stops early on an empty page or once a page's oldest event is older than
/// the activity window. Never fails: a failed page ends paging and whatever
/// was collected so far is returned.
pub async fn fetch_events<A: GithubApi>(
    api: &A,
    username: &str,
    max_pages: u32,
    now: DateTime<Utc>,
) -> Vec<ActivityEvent> {
    let cutoff = now - Duration::days(ACTIVITY_WINDOW_DAYS);
    let mut collected: Vec<RawEvent> = Vec::new();

    for page in 1..=max_pages {
        let events = match api.events_page(username, page).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(username, page, error = %e, "failed to fetch events page");
                break;
            }
        };
        if events.is_empty() {
            break;
        }

        let oldest = events.last().and_then(|e| e.created_at);
        collected.extend(events);

        if oldest.is_some_and(|ts| ts < cutoff) {
            break;
        }
    }

    tracing::debug!(username, count = collected.len(), "fetched events");
    collected
        .iter()
        .map(|raw| normalize_event(raw, now))
        .collect()
}

/// Simplify one upstream event. Only push events carry a branch and commits.
pub fn normalize_event(raw: &RawEvent, now: DateTime<Utc>) -> ActivityEvent {
    let kind = EventKind::from_upstream(&raw.kind);
    let repo_name = raw
        .repo
        .as_ref()
        .map(|r| r.name.clone())
        .unwrap_or_default();
    let repo_url = if repo_name.is_empty() {
        String::new()
    } else {
        format!("https://github.com/{repo_name}")
    };

    let (branch, commits) = if kind == EventKind::Push {
        let branch = raw
            .payload
            .git_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(|r| r.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(r).to_string());
        (branch, raw.payload.commit_count())
    } else {
        (None, 0)
    };

    ActivityEvent {
        kind,
        repo_name,
        repo_url,
        branch,
        commits,
        created_at: raw.created_at.unwrap_or(now),
    }
}
