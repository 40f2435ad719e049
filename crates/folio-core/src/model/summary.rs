use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub username: String,
    pub totals: Totals,
    pub recent_projects: Vec<RecentProject>,
    pub weekly_activity: Vec<DayActivity>,
    pub development_activity: Vec<FeedEntry>,
    pub top_languages: Vec<LanguageShare>,
    pub language_basis: LanguageBasis,
    pub streak: Streak,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_repos: usize,
    pub total_stars: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProject {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub stars: u64,
    pub language: Option<String>,
    /// Relative age, e.g. "3 days ago".
    pub last_update: String,
}

/// One bucket of the trailing 7-day histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    /// Weekday label ("Mon", "Tue", ...).
    pub day: String,
    pub date: NaiveDate,
    pub commits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub time: String,
    pub action: String,
    pub repo: String,
    pub branch: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTotal {
    pub name: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub percentage: u32,
}

/// What the language numbers were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageBasis {
    Bytes,
    PrimaryLanguageCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive days ending today or yesterday.
    pub current: u32,
    /// Longest run inside the fetched event window.
    pub longest: u32,
}
