//! The seam between the analyzer and the GitHub API.

use crate::Result;
use crate::github::client::GitHubClient;
use crate::github::models::{Contribution, Release, Repository};
use crate::github::pagination;
use core::future::Future;
use futures::Stream;

/// Source of per-organization repository data.
///
/// The analyzer only talks to this trait, which keeps it testable against
/// in-memory stubs.
pub trait RepositoryProvider: Send + Sync + 'static {
    /// All repositories of the given organization.
    fn repositories_of(&self, organization: &str) -> impl Future<Output = Result<Vec<Repository>>> + Send;

    /// All contributors of the given repository.
    fn contributors_of(&self, organization: &str, repository: &str) -> impl Future<Output = Result<Vec<Contribution>>> + Send;

    /// The last release of the given repository, or `None` if it never published one.
    fn last_release_of(&self, organization: &str, repository: &str) -> impl Future<Output = Result<Option<Release>>> + Send;
}

/// A [`RepositoryProvider`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    #[must_use]
    pub const fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// The repositories of an organization as a lazy stream of pages.
    ///
    /// Lets callers start processing before the full list has arrived. Every
    /// call re-issues requests from page 1; the stream holds no cursor state
    /// that could be shared across consumers.
    pub fn repository_pages<'a>(&'a self, organization: &'a str) -> impl Stream<Item = Result<Vec<Repository>>> + Send + 'a {
        pagination::page_stream(move |page| self.client.repositories_page(organization, page))
    }

    /// The contributors of a repository as a lazy stream of pages.
    pub fn contributor_pages<'a>(
        &'a self,
        organization: &'a str,
        repository: &'a str,
    ) -> impl Stream<Item = Result<Vec<Contribution>>> + Send + 'a {
        pagination::page_stream(move |page| self.client.contributors_page(organization, repository, page))
    }
}

impl RepositoryProvider for GitHubProvider {
    async fn repositories_of(&self, organization: &str) -> Result<Vec<Repository>> {
        pagination::fetch_all(|page| self.client.repositories_page(organization, page)).await
    }

    async fn contributors_of(&self, organization: &str, repository: &str) -> Result<Vec<Contribution>> {
        pagination::fetch_all(|page| self.client.contributors_page(organization, repository, page)).await
    }

    async fn last_release_of(&self, organization: &str, repository: &str) -> Result<Option<Release>> {
        self.client.latest_release(organization, repository).await
    }
}
