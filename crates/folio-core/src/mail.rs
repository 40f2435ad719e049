//! Contact form relay over the Resend HTTP API.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::MailConfig;
use crate::error::{FolioError, Result};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_SUBJECT_LEN: usize = 200;
pub const MAX_MESSAGE_LEN: usize = 5000;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email and message are required.";
pub const NOT_CONFIGURED_MESSAGE: &str = "Email service is not configured.";

const DEFAULT_SUBJECT: &str = "New message from portfolio";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@<>]+@[^\s@<>]+\.[^\s@<>]+$").unwrap());

/// A contact form submission as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission that passed [`ContactSubmission::validate`]. Fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<ValidContact> {
        let name = trimmed(&self.name);
        let email = trimmed(&self.email).replace(['\r', '\n'], "");
        let message = trimmed(&self.message);
        let subject = Some(trimmed(&self.subject)).filter(|s| !s.is_empty());

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(FolioError::InvalidInput(REQUIRED_FIELDS_MESSAGE.into()));
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(FolioError::InvalidInput(
                "Please provide a valid email address.".into(),
            ));
        }
        check_len("Name", &name, MAX_NAME_LEN)?;
        if let Some(ref subject) = subject {
            check_len("Subject", subject, MAX_SUBJECT_LEN)?;
        }
        check_len("Message", &message, MAX_MESSAGE_LEN)?;

        Ok(ValidContact {
            name,
            email,
            subject,
            message,
        })
    }
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn check_len(label: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(FolioError::InvalidInput(format!(
            "{label} must be at most {max} characters."
        )));
    }
    Ok(())
}

impl ValidContact {
    pub fn email_subject(&self) -> String {
        match self.subject {
            Some(ref subject) => format!("Portfolio • {subject}"),
            None => DEFAULT_SUBJECT.to_string(),
        }
    }

    /// HTML body of the notification. All user input is escaped.
    pub fn html_body(&self) -> String {
        let subject_line = self
            .subject
            .as_deref()
            .map(|s| format!("<p><strong>Subject:</strong> {}</p>", html_escape(s)))
            .unwrap_or_default();
        let message = html_escape(&self.message)
            .replace("\r\n", "\n")
            .replace('\n', "<br/>");

        format!(
            r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #111">
  <h2>New portfolio message</h2>
  <p><strong>From:</strong> {name} &lt;{email}&gt;</p>
  {subject_line}
  <p><strong>Message:</strong></p>
  <p>{message}</p>
</div>"#,
            name = html_escape(&self.name),
            email = html_escape(&self.email),
        )
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// -- Provider --

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: String,
    html: String,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ProviderError {
    message: Option<String>,
}

/// Sends contact notifications. Only exists when an API key is configured.
#[derive(Clone)]
pub struct MailService {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    from: String,
    to: String,
}

impl std::fmt::Debug for MailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailService")
            .field("base_url", &self.base_url)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl MailService {
    /// `None` when no API key resolves from config or the environment.
    pub fn from_config(config: &MailConfig) -> Option<Self> {
        let api_key = config.resolved_api_key()?;
        Some(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            from: config.from.clone(),
            to: config.recipient().to_string(),
        })
    }

    /// Deliver one validated submission and return the provider's message id.
    pub async fn send_contact(&self, contact: &ValidContact) -> Result<String> {
        let url = format!("{}/emails", self.base_url);
        let req = SendEmailRequest {
            from: &self.from,
            to: [&self.to],
            reply_to: &contact.email,
            subject: contact.email_subject(),
            html: contact.html_body(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| FolioError::Mail(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("Mail provider returned {status}"));
            tracing::warn!(%status, "contact mail rejected by provider");
            return Err(FolioError::Mail(message));
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| FolioError::Mail(format!("Failed to parse provider response: {e}")))?;
        tracing::info!(id = %sent.id, "contact mail sent");
        Ok(sent.id)
    }
}
