use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Planning,
    Archived,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Planning => write!(f, "planning"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// A project card, either seeded from content or built from a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub last_update: NaiveDate,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_fork: bool,
}

/// Accept `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the date.
fn date_or_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|ts| ts.date_naive()))
        .map_err(serde::de::Error::custom)
}

impl Project {
    /// Forks and archived repositories are left out of totals and rankings.
    pub fn is_showcased(&self) -> bool {
        !self.is_fork && self.status != ProjectStatus::Archived
    }
}

/// Append `fetched` projects whose id is not already present, keeping
/// `seed` order and never dropping a seeded entry.
pub fn merge_projects(seed: &[Project], fetched: Vec<Project>) -> Vec<Project> {
    let mut seen: HashSet<String> = seed.iter().map(|p| p.id.clone()).collect();
    let mut merged = seed.to_vec();
    for project in fetched {
        if seen.insert(project.id.clone()) {
            merged.push(project);
        }
    }
    merged
}

/// Drop later duplicates of the same id.
pub fn dedup_by_id(projects: Vec<Project>) -> Vec<Project> {
    merge_projects(&[], projects)
}
