//! Static site content: profile, résumé and hand-maintained projects.
//!
//! Loaded once from the TOML file named by `content.path`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ContentConfig;
use crate::error::{FolioError, Result};
use crate::model::Project;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub resume: Resume,
    /// Projects that are not GitHub repositories. Always listed before fetched ones.
    #[serde(default)]
    pub personal_projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Link label to URL, e.g. `github = "https://github.com/..."`.
    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub technical_skills: BTreeMap<String, SkillGroup>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub university: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub organization: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// A skill category is either a list of items or a single free-text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillGroup {
    List(Vec<String>),
    Text(String),
}

impl PortfolioContent {
    /// Load content from `config.path`. Unset or missing file gives empty content.
    pub fn load(config: &ContentConfig) -> Result<Self> {
        let Some(ref path) = config.path else {
            return Ok(Self::default());
        };
        let path = Path::new(path);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "content file not found, serving empty content");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| FolioError::Config(format!("failed to read {}: {e}", path.display())))?;
        let content = Self::from_toml(&raw)
            .map_err(|e| FolioError::Config(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            personal_projects = content.personal_projects.len(),
            "loaded content"
        );
        Ok(content)
    }

    pub fn from_toml(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
