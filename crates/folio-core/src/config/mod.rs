use crate::error::{FolioError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Account shown when a request does not name one.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Environment variable consulted when `token` is unset. Defaults to `GITHUB_TOKEN`.
    #[serde(default)]
    pub token_env_var: Option<String>,
    #[serde(default = "default_github_api")]
    pub api_base_url: String,
    /// Base URL of a relay that serves `/repos?username=` with pre-shaped projects.
    #[serde(default)]
    pub relay_url: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_event_pages")]
    pub max_event_pages: u32,
    #[serde(default)]
    pub commit_counting: CommitCounting,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            token_env_var: None,
            api_base_url: default_github_api(),
            relay_url: None,
            user_agent: default_user_agent(),
            max_event_pages: default_max_event_pages(),
            commit_counting: CommitCounting::default(),
        }
    }
}

impl GithubConfig {
    /// Token from config, falling back to the environment.
    pub fn resolved_token(&self) -> Option<String> {
        resolve_secret(
            self.token.as_deref(),
            self.token_env_var.as_deref(),
            "GITHUB_TOKEN",
        )
    }

    /// Relay base URL, trimmed and without a trailing slash. `None` when unset or blank.
    pub fn relay_base(&self) -> Option<String> {
        let trimmed = self.relay_url.as_deref()?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.trim_end_matches('/').to_string())
    }

    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

/// How a single push event contributes to the weekly histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitCounting {
    /// Every push counts as at least one commit.
    #[default]
    AtLeastOne,
    /// Use the payload commit count as-is (a push may contribute zero).
    Raw,
}

impl CommitCounting {
    pub fn contribution(self, commits: u32) -> u32 {
        match self {
            Self::AtLeastOne => commits.max(1),
            Self::Raw => commits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Keyed by `owner/name` or bare repository name.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            overrides: BTreeMap::new(),
        }
    }
}

impl ImageConfig {
    /// Override for the repository, full name first, then short name, else the placeholder.
    pub fn image_for(&self, full_name: &str, name: &str) -> String {
        self.lookup(full_name)
            .or_else(|| self.lookup(name))
            .unwrap_or(&self.placeholder)
            .clone()
    }

    fn lookup(&self, key: &str) -> Option<&String> {
        self.overrides
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset. Defaults to `RESEND_API_KEY`.
    #[serde(default)]
    pub env_var: Option<String>,
    #[serde(default = "default_mail_base_url")]
    pub base_url: String,
    #[serde(default = "default_mail_from")]
    pub from: String,
    /// Recipient of contact messages. Falls back to `from`.
    #[serde(default)]
    pub to: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            env_var: None,
            base_url: default_mail_base_url(),
            from: default_mail_from(),
            to: None,
        }
    }
}

impl MailConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_secret(
            self.api_key.as_deref(),
            self.env_var.as_deref(),
            "RESEND_API_KEY",
        )
    }

    pub fn recipient(&self) -> &str {
        self.to
            .as_deref()
            .filter(|to| !to.trim().is_empty())
            .unwrap_or(&self.from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_web_port")]
    pub port: u16,
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_cors_origin")]
    pub cors_allow_origin: String,
    /// Directory with the exported front-end, served for unmatched paths.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            host: default_web_host(),
            cors_allow_origin: default_cors_origin(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// TOML file with profile, résumé and seeded personal projects.
    #[serde(default)]
    pub path: Option<String>,
}

// -- Defaults --

fn default_github_api() -> String {
    "https://api.github.com".to_string()
}
fn default_user_agent() -> String {
    concat!("folio/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_max_event_pages() -> u32 {
    3
}
fn default_placeholder() -> String {
    "/placeholder.svg".to_string()
}
fn default_mail_base_url() -> String {
    "https://api.resend.com".to_string()
}
fn default_mail_from() -> String {
    "onboarding@resend.dev".to_string()
}
fn default_web_port() -> u16 {
    3001
}
fn default_web_host() -> String {
    "127.0.0.1".to_string()
}
fn default_cors_origin() -> String {
    "*".to_string()
}

/// Upper bound on event pages; the events API stops serving past ~300 entries.
pub const MAX_EVENT_PAGES: u32 = 10;

impl FolioConfig {
    /// Load configuration with a layered merge:
    /// 1. ~/.config/folio/config.toml (global)
    /// 2. folio.toml (project)
    /// 3. folio.local.toml (local, gitignored)
    /// 4. `FOLIO_<SECTION>__<KEY>` environment variables
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join("folio.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join("folio.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| FolioError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| FolioError::Config(e.to_string()))?;

        cfg.validate();
        Ok(cfg)
    }

    /// Defaults only (no files, no environment).
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate config values, clamping out-of-range values and logging warnings.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.github.max_event_pages == 0 {
            warnings.push("github.max_event_pages = 0, setting to 1".to_string());
            self.github.max_event_pages = 1;
        }
        if self.github.max_event_pages > MAX_EVENT_PAGES {
            warnings.push(format!(
                "github.max_event_pages = {} exceeds {MAX_EVENT_PAGES}, clamping",
                self.github.max_event_pages
            ));
            self.github.max_event_pages = MAX_EVENT_PAGES;
        }

        if self.github.api_base_url.trim().is_empty() {
            warnings.push("github.api_base_url is empty, using the public API".to_string());
            self.github.api_base_url = default_github_api();
        }

        if self.mail.base_url.trim().is_empty() {
            warnings.push("mail.base_url is empty, using the default provider".to_string());
            self.mail.base_url = default_mail_base_url();
        }

        if self.mail.to.is_none() && self.mail.resolved_api_key().is_some() {
            warnings.push(format!(
                "mail.to is unset; contact messages go to {}",
                self.mail.from
            ));
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
}

/// Resolve a secret: config field first, then environment variable.
/// Blank values count as absent.
pub fn resolve_secret(
    value: Option<&str>,
    env_var_override: Option<&str>,
    default_env_var: &str,
) -> Option<String> {
    if let Some(v) = value {
        if !v.trim().is_empty() {
            return Some(v.trim().to_string());
        }
    }

    let env_var_name = env_var_override.unwrap_or(default_env_var);
    std::env::var(env_var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
