//! Fan-out analysis of an organization's repositories.
//!
//! For N repositories the analyzer runs one task per repository, each issuing
//! its two sub-fetches (contributors, last release) concurrently, so up to
//! 2·N requests can be in flight. Completed reports flow through a
//! multi-producer/single-consumer channel to a collector that surfaces them
//! to the caller in completion order.

mod report;

pub use report::RepositoryReport;

use crate::Result;
use crate::github::RepositoryProvider;
use ohno::{EnrichableExt, bail};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const LOG_TARGET: &str = "  analyzer";

/// Analyzer of all repositories belonging to one organization.
#[derive(Debug)]
pub struct Analyzer<P> {
    provider: Arc<P>,
}

impl<P: RepositoryProvider> Analyzer<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Analyze every repository of `organization`, invoking `on_report` for each
    /// completed report and returning the full set.
    ///
    /// Reports arrive in arbitrary completion order; each is emitted only after
    /// both of its sub-fetches have resolved. The first failure anywhere in the
    /// fan-out aborts all in-flight work and surfaces as the returned error, in
    /// which case `on_report` has fired zero or more times but no partial set is
    /// returned. The returned collection holds exactly one report per repository.
    ///
    /// Dropping the returned future (for instance from `tokio::time::timeout`)
    /// cancels all in-flight work the same way.
    pub async fn analyze(&self, organization: &str, mut on_report: impl FnMut(&RepositoryReport)) -> Result<Vec<RepositoryReport>> {
        let repositories = self
            .provider
            .repositories_of(organization)
            .await
            .map_err(|e| e.enrich_with(|| format!("could not fetch the repositories of organization '{organization}'")))?;

        let expected = repositories.len();
        log::debug!(target: LOG_TARGET, "Analyzing {expected} repositories of organization '{organization}'");

        // Every worker sends exactly one outcome, so sizing the channel to the
        // repository count means no sender ever blocks.
        let (tx, mut rx) = mpsc::channel(expected.max(1));
        let mut workers = JoinSet::new();

        for repository in repositories {
            let provider = Arc::clone(&self.provider);
            let tx = tx.clone();
            let organization = organization.to_owned();

            let _ = workers.spawn(async move {
                // try_join! drops the sibling sub-fetch as soon as either fails
                let outcome = tokio::try_join!(
                    provider.contributors_of(&organization, repository.name()),
                    provider.last_release_of(&organization, repository.name()),
                )
                .map(|(contributors, release)| {
                    RepositoryReport::new(
                        repository.name().to_owned(),
                        repository.issues,
                        repository.stars,
                        contributors,
                        release,
                    )
                });

                // A closed channel means the collector already gave up
                let _ = tx.send(outcome).await;
            });
        }

        drop(tx);

        let mut reports = Vec::with_capacity(expected);
        for _ in 0..expected {
            let Some(outcome) = rx.recv().await else {
                // Every live worker sends exactly once, so a closed channel here
                // means a worker died (panicked) without reporting. Returning a
                // short set would drop repositories silently.
                workers.abort_all();
                bail!(
                    "analysis of organization '{organization}' lost {} of {expected} repository reports",
                    expected - reports.len()
                );
            };

            match outcome {
                Ok(report) => {
                    log::debug!(target: LOG_TARGET, "Completed report for repository '{}'", report.name);
                    on_report(&report);
                    reports.push(report);
                }
                Err(e) => {
                    // Cancel all sibling work; dropping the receiver closes the
                    // channel so aborted stragglers cannot block on a send.
                    workers.abort_all();
                    return Err(e.enrich_with(|| format!("analysis of organization '{organization}' failed")));
                }
            }
        }

        Ok(reports)
    }
}
