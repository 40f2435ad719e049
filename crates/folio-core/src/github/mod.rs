//! GitHub access: repository listing, public events, and language breakdowns.
//!
//! Upstream calls go through the [`GithubApi`] trait so the aggregation code
//! can run against [`GithubClient`] in production and an in-memory fake in tests.

mod api;
mod client;
pub mod events;
pub mod languages;
mod relay;
pub mod repos;
mod service;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{GithubApi, RawEvent, RawEventRepo, RawOwner, RawPayload, RawRepo};
pub use client::GithubClient;
pub use events::fetch_events;
pub use languages::{aggregate_languages, LanguageBreakdown};
pub use relay::RelayClient;
pub use repos::{fetch_projects, RepoStrategy};
pub use service::GithubService;
