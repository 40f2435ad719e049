//! Bytes per language summed over a set of repositories.

use std::collections::HashMap;

use futures::future::join_all;

use crate::github::api::GithubApi;
use crate::model::{LanguageBasis, LanguageShare, LanguageTotal, Project};

/// Look up every repository's language bytes concurrently and sum them.
///
/// Repositories whose lookup fails are skipped. The result is sorted by bytes,
/// largest first (ties by name).
pub async fn aggregate_languages<A: GithubApi>(
    api: &A,
    owner: &str,
    repo_names: &[String],
) -> Vec<LanguageTotal> {
    let lookups = repo_names.iter().map(|name| async move {
        (name, api.repo_languages(owner, name).await)
    });

    let mut totals: HashMap<String, u64> = HashMap::new();
    for (name, result) in join_all(lookups).await {
        match result {
            Ok(languages) => {
                for (language, bytes) in languages {
                    *totals.entry(language).or_default() += bytes;
                }
            }
            Err(e) => {
                tracing::debug!(repo = %name, error = %e, "language lookup failed, skipping");
            }
        }
    }

    rank(totals)
}

fn rank(totals: HashMap<String, u64>) -> Vec<LanguageTotal> {
    let mut ranked: Vec<LanguageTotal> = totals
        .into_iter()
        .map(|(name, bytes)| LanguageTotal { name, bytes })
        .collect();
    ranked.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// Language totals together with what they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub enum LanguageBreakdown {
    /// Byte counts from the languages endpoint.
    Bytes(Vec<LanguageTotal>),
    /// Number of repositories naming each language as primary, used as a byte proxy.
    PrimaryLanguageCount(Vec<LanguageTotal>),
}

impl LanguageBreakdown {
    /// Use byte totals when there are any, else fall back to primary-language counts.
    pub fn resolve(byte_totals: Vec<LanguageTotal>, repos: &[Project]) -> Self {
        if !byte_totals.is_empty() {
            return Self::Bytes(byte_totals);
        }

        let mut counts: HashMap<String, u64> = HashMap::new();
        for language in repos.iter().filter_map(|r| r.language.as_ref()) {
            *counts.entry(language.clone()).or_default() += 1;
        }
        Self::PrimaryLanguageCount(rank(counts))
    }

    pub fn basis(&self) -> LanguageBasis {
        match self {
            Self::Bytes(_) => LanguageBasis::Bytes,
            Self::PrimaryLanguageCount(_) => LanguageBasis::PrimaryLanguageCount,
        }
    }

    pub fn totals(&self) -> &[LanguageTotal] {
        match self {
            Self::Bytes(totals) | Self::PrimaryLanguageCount(totals) => totals,
        }
    }

    /// Integer percentages of the top `n` entries, relative to those entries'
    /// combined total. Rounded independently, so the sum may drift from 100.
    pub fn top_shares(&self, n: usize) -> Vec<LanguageShare> {
        let top = &self.totals()[..self.totals().len().min(n)];
        let combined = top.iter().map(|l| l.bytes).sum::<u64>().max(1);
        top.iter()
            .map(|l| LanguageShare {
                name: l.name.clone(),
                percentage: ((l.bytes as f64 / combined as f64) * 100.0).round() as u32,
            })
            .collect()
    }
}
