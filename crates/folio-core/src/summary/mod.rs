//! Summary Builder: one dashboard snapshot assembled from the three fetchers.

mod streak;
mod weekly;

pub use streak::{compute_streak, push_days};
pub use weekly::{weekly_histogram, WEEK_DAYS};

use chrono::{DateTime, TimeZone, Utc};

use crate::calendar::{calendar_day, format_date_ago, format_time_ago};
use crate::config::CommitCounting;
use crate::github::{GithubApi, GithubClient, GithubService, LanguageBreakdown};
use crate::model::{ActivityEvent, FeedEntry, Project, RecentProject, Summary, Totals};

pub const RECENT_PROJECTS: usize = 3;
pub const RECENT_PROJECT_TAGS: usize = 3;
pub const TOP_LANGUAGES: usize = 5;
pub const FEED_LENGTH: usize = 10;

/// Builds summaries against one GitHub service, bucketing days in `tz`.
pub struct SummaryBuilder<'a, Tz, A: GithubApi = GithubClient> {
    github: &'a GithubService<A>,
    tz: Tz,
}

impl<'a, Tz, A> SummaryBuilder<'a, Tz, A>
where
    Tz: TimeZone + Sync,
    A: GithubApi,
{
    pub fn new(github: &'a GithubService<A>, tz: Tz) -> Self {
        Self { github, tz }
    }

    /// Fetch repositories and events concurrently, then languages for the
    /// showcased repositories, and assemble the snapshot.
    ///
    /// Never fails: a failed repository fetch yields an empty repository list
    /// and failed event pages or language lookups shrink their sections.
    pub async fn build(&self, username: &str, now: DateTime<Utc>) -> Summary {
        let (repos, events) = tokio::join!(
            self.github.projects(username),
            self.github.events(username, now)
        );
        let repos = match repos {
            Ok(repos) => repos,
            Err(e) => {
                tracing::warn!(username, error = %e, "repository fetch failed, summarising without repos");
                Vec::new()
            }
        };

        let showcased: Vec<Project> = repos.into_iter().filter(Project::is_showcased).collect();
        let names: Vec<String> = showcased.iter().map(|p| p.name.clone()).collect();
        let byte_totals = self.github.languages(username, &names).await;
        let languages = LanguageBreakdown::resolve(byte_totals, &showcased);

        assemble(
            username,
            &showcased,
            &events,
            &languages,
            self.github.commit_counting(),
            now,
            &self.tz,
        )
    }
}

/// Pure assembly of a summary from already-fetched inputs.
///
/// `repos` must already exclude forks and archived repositories.
pub fn assemble<Tz: TimeZone>(
    username: &str,
    repos: &[Project],
    events: &[ActivityEvent],
    languages: &LanguageBreakdown,
    counting: CommitCounting,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Summary {
    let today = calendar_day(&now, tz);

    Summary {
        username: username.to_string(),
        totals: Totals {
            total_repos: repos.len(),
            total_stars: repos.iter().map(|r| r.stars).sum(),
        },
        recent_projects: recent_projects(repos, now),
        weekly_activity: weekly_histogram(events, username, counting, today, tz),
        development_activity: activity_feed(events, now),
        top_languages: languages.top_shares(TOP_LANGUAGES),
        language_basis: languages.basis(),
        streak: compute_streak(&push_days(events, username, tz), today),
    }
}

/// The most recently updated projects, newest first.
pub fn recent_projects(repos: &[Project], now: DateTime<Utc>) -> Vec<RecentProject> {
    let mut sorted: Vec<&Project> = repos.iter().collect();
    sorted.sort_by(|a, b| b.last_update.cmp(&a.last_update));
    sorted
        .into_iter()
        .take(RECENT_PROJECTS)
        .map(|p| RecentProject {
            name: p.name.clone(),
            description: p.description.clone(),
            tags: p.tags.iter().take(RECENT_PROJECT_TAGS).cloned().collect(),
            stars: p.stars,
            language: p.language.clone(),
            last_update: format_date_ago(p.last_update, now),
        })
        .collect()
}

/// The most recent events of any kind and any repository.
pub fn activity_feed(events: &[ActivityEvent], now: DateTime<Utc>) -> Vec<FeedEntry> {
    let mut sorted: Vec<&ActivityEvent> = events.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
        .into_iter()
        .take(FEED_LENGTH)
        .map(|e| FeedEntry {
            time: format_time_ago(e.created_at, now),
            action: e.kind.action_phrase().to_string(),
            repo: e.short_repo_name().to_string(),
            branch: e.branch.clone(),
            url: e.repo_url.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FolioConfig;
    use crate::github::fake::{raw_event, raw_push, raw_repo, FakeGithub};
    use crate::github::RepoStrategy;
    use crate::model::{EventKind, LanguageBasis, LanguageTotal, ProjectStatus, Streak};
    use chrono::{Duration, NaiveDate};
    use std::collections::{BTreeMap, HashMap};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap()
    }

    fn service(api: FakeGithub) -> GithubService<FakeGithub> {
        let config = FolioConfig::default();
        GithubService::new(api, RepoStrategy::Direct { enrich: false }, &config)
    }

    fn project(id: &str, updated: (i32, u32, u32)) -> Project {
        Project {
            id: id.into(),
            name: id.into(),
            description: Some(format!("{id} description")),
            status: ProjectStatus::Active,
            category: "GitHub".into(),
            tags: vec!["#a".into(), "#b".into(), "#c".into(), "#d".into()],
            stars: 2,
            forks: 0,
            language: Some("Rust".into()),
            last_update: NaiveDate::from_ymd_opt(updated.0, updated.1, updated.2).unwrap(),
            demo: None,
            github: None,
            image: None,
            features: vec![],
            is_fork: false,
        }
    }

    #[tokio::test]
    async fn test_worked_example() {
        let mut repo = raw_repo("u", "site");
        repo.stargazers_count = 4;
        let mut languages = HashMap::new();
        languages.insert(
            "site".to_string(),
            BTreeMap::from([("TypeScript".to_string(), 800), ("CSS".to_string(), 200)]),
        );
        let api = FakeGithub {
            repos: vec![repo],
            event_pages: vec![Some(vec![
                raw_push("u/site", 3, now() - Duration::hours(2)),
                raw_push("u/site", 1, now() - Duration::days(1)),
            ])],
            languages,
            ..Default::default()
        };
        let github = service(api);

        let summary = SummaryBuilder::new(&github, Utc).build("u", now()).await;

        assert_eq!(summary.totals, Totals { total_repos: 1, total_stars: 4 });
        assert_eq!(summary.weekly_activity[6].commits, 3);
        assert_eq!(summary.weekly_activity[5].commits, 1);
        assert_eq!(summary.streak.current, 2);
        assert_eq!(summary.language_basis, LanguageBasis::Bytes);
        assert_eq!(summary.top_languages[0].name, "TypeScript");
        assert_eq!(summary.top_languages[0].percentage, 80);
        assert_eq!(summary.top_languages[1].percentage, 20);
        assert_eq!(summary.development_activity.len(), 2);
        assert_eq!(summary.development_activity[0].time, "2 hours ago");
    }

    #[tokio::test]
    async fn test_zero_repos_zero_totals() {
        let github = service(FakeGithub::default());
        let summary = SummaryBuilder::new(&github, Utc).build("u", now()).await;
        assert_eq!(summary.totals, Totals::default());
        assert!(summary.recent_projects.is_empty());
        assert!(summary.top_languages.is_empty());
        assert_eq!(summary.weekly_activity.len(), 7);
        assert_eq!(summary.streak, Streak::default());
    }

    #[tokio::test]
    async fn test_repo_failure_degrades_to_empty() {
        let github = service(FakeGithub {
            fail_repos: true,
            event_pages: vec![Some(vec![raw_push("u/a", 2, now())])],
            ..Default::default()
        });
        let summary = SummaryBuilder::new(&github, Utc).build("u", now()).await;
        assert_eq!(summary.totals.total_repos, 0);
        assert_eq!(summary.weekly_activity[6].commits, 2);
    }

    #[tokio::test]
    async fn test_forks_and_archived_excluded() {
        let mut fork = raw_repo("u", "fork");
        fork.fork = true;
        fork.stargazers_count = 100;
        let mut archived = raw_repo("u", "old");
        archived.archived = true;
        let mut kept = raw_repo("u", "kept");
        kept.stargazers_count = 1;
        kept.language = Some("Go".into());
        let github = service(FakeGithub {
            repos: vec![fork, archived, kept],
            ..Default::default()
        });

        let summary = SummaryBuilder::new(&github, Utc).build("u", now()).await;
        assert_eq!(summary.totals, Totals { total_repos: 1, total_stars: 1 });
        assert_eq!(summary.recent_projects.len(), 1);
        assert_eq!(summary.recent_projects[0].name, "kept");
        // no language bytes resolved, so the primary language is counted
        assert_eq!(summary.language_basis, LanguageBasis::PrimaryLanguageCount);
        assert_eq!(summary.top_languages[0].name, "Go");
        assert_eq!(summary.top_languages[0].percentage, 100);
    }

    #[test]
    fn test_feed_is_unfiltered_and_capped() {
        let mut events: Vec<ActivityEvent> = (0..12)
            .map(|i| {
                crate::github::events::normalize_event(
                    &raw_event("WatchEvent", "someone/else", now() - Duration::minutes(i)),
                    now(),
                )
            })
            .collect();
        events.reverse();
        let feed = activity_feed(&events, now());
        assert_eq!(feed.len(), FEED_LENGTH);
        assert_eq!(feed[0].time, "0 min ago");
        assert_eq!(feed[0].action, "starred");
        assert_eq!(feed[0].repo, "else");
        assert_eq!(feed[0].url, "https://github.com/someone/else");
    }

    #[test]
    fn test_feed_push_entry() {
        let push = crate::github::events::normalize_event(
            &raw_push("u/site", 2, now() - Duration::days(2)),
            now(),
        );
        let feed = activity_feed(&[push], now());
        assert_eq!(feed[0].action, "pushed commits to");
        assert_eq!(feed[0].branch.as_deref(), Some("main"));
        assert_eq!(feed[0].time, "2 days ago");
        assert_eq!(EventKind::Push.action_phrase(), feed[0].action);
    }

    #[test]
    fn test_recent_projects_top_three_newest() {
        let repos = vec![
            project("a", (2025, 1, 1)),
            project("b", (2025, 3, 8)),
            project("c", (2024, 12, 1)),
            project("d", (2025, 2, 1)),
        ];
        let recent = recent_projects(&repos, now());
        let names: Vec<&str> = recent.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a"]);
        assert_eq!(recent[0].tags.len(), RECENT_PROJECT_TAGS);
        assert_eq!(recent[0].last_update, "2 days ago");
    }

    #[test]
    fn test_assemble_top_languages_bounded() {
        let languages = LanguageBreakdown::Bytes(
            (0..8)
                .map(|i| LanguageTotal {
                    name: format!("L{i}"),
                    bytes: 1000 - i * 100,
                })
                .collect(),
        );
        let summary = assemble(
            "u",
            &[],
            &[],
            &languages,
            CommitCounting::AtLeastOne,
            now(),
            &Utc,
        );
        assert_eq!(summary.top_languages.len(), TOP_LANGUAGES);
        assert!(summary
            .top_languages
            .iter()
            .all(|l| l.percentage <= 100));
        assert!(summary.streak.longest >= summary.streak.current);
    }
}
