//! GitHub API access: wire records, a minimal client, pagination, and the
//! provider seam the analyzer consumes.

mod client;
mod models;
pub mod pagination;
mod provider;

pub use client::{DEFAULT_BASE_URL, GitHubClient};
pub use models::{Contribution, Release, Repository};
pub use provider::{GitHubProvider, RepositoryProvider};
