//! GitHub wire records.
//!
//! Field names match the GitHub REST API payloads exactly; everything else in
//! the responses is ignored.

use serde::Deserialize;

/// A repository belonging to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub id: u64,

    /// Full name in `<org>/<repo>` format.
    pub full_name: String,

    /// Number of repository stars.
    #[serde(rename = "stargazers_count")]
    pub stars: u32,

    /// Number of open issues.
    #[serde(rename = "open_issues_count")]
    pub issues: u32,
}

impl Repository {
    /// The name of the owning organization, i.e. everything before the first `/`.
    #[must_use]
    pub fn organization(&self) -> &str {
        self.full_name.split_once('/').map_or(self.full_name.as_str(), |(org, _)| org)
    }

    /// The short name of the repository, i.e. everything after the first `/`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.full_name.split_once('/').map_or(self.full_name.as_str(), |(_, name)| name)
    }
}

/// A single contributor's tally for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Contribution {
    /// Login name of the contributor.
    #[serde(rename = "login")]
    pub user: String,

    /// Number of contributions.
    pub contributions: u64,
}

/// A published release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Tag name of the release.
    pub tag_name: String,

    /// Publication date, as reported by the API.
    #[serde(rename = "published_at")]
    pub date: String,
}
