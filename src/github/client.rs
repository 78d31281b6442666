//! Minimal GitHub API client for the endpoints the analyzer needs.

use crate::Result;
use crate::github::models::{Contribution, Release, Repository};
use crate::github::pagination::{self, Page};
use ohno::{IntoAppError, bail};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "    github";

/// Default GitHub REST API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";

/// Classification of a GitHub API response.
///
/// `NotFound` is kept distinct from `Failed` so callers can decide whether a
/// 404 means "resource genuinely absent" or "request failed".
#[derive(Debug)]
enum ApiOutcome {
    /// Request succeeded
    Success(reqwest::Response),

    /// The requested resource was not found (404)
    NotFound,

    /// Request failed with a non-success status
    Failed(ohno::AppError),
}

/// GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a new GitHub API client with an optional authentication token and base URL.
    ///
    /// The base URL override exists for talking to mock servers and GitHub-compatible
    /// API endpoints.
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        Ok(Self {
            client: reqwest::Client::builder().user_agent("org-scan").default_headers(headers).build()?,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the repositories of an organization.
    pub async fn repositories_page(&self, organization: &str, page: u32) -> Result<Page<Repository>> {
        let url = format!("{}/orgs/{organization}/repos?page={page}", self.base_url);
        self.get_page(&url).await
    }

    /// Fetch one page of the contributors of a repository.
    pub async fn contributors_page(&self, organization: &str, repository: &str, page: u32) -> Result<Page<Contribution>> {
        let url = format!("{}/repos/{organization}/{repository}/contributors?page={page}", self.base_url);
        self.get_page(&url).await
    }

    /// Fetch the latest release of a repository.
    ///
    /// A 404 response means the repository has no release and maps to `Ok(None)`
    /// rather than an error.
    pub async fn latest_release(&self, organization: &str, repository: &str) -> Result<Option<Release>> {
        let url = format!("{}/repos/{organization}/{repository}/releases/latest", self.base_url);

        match self.api_call(&url).await? {
            ApiOutcome::Success(response) => {
                let release = response
                    .json()
                    .await
                    .into_app_err_with(|| format!("malformed release JSON in response from '{url}'"))?;
                Ok(Some(release))
            }
            ApiOutcome::NotFound => {
                log::debug!(target: LOG_TARGET, "No release found for '{organization}/{repository}'");
                Ok(None)
            }
            ApiOutcome::Failed(e) => Err(e),
        }
    }

    /// Fetch a single page of a list endpoint, extracting the next page number
    /// from the `Link` response header.
    async fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        let response = match self.api_call(url).await? {
            ApiOutcome::Success(response) => response,
            ApiOutcome::NotFound => bail!("GitHub API request failed with status code 404 for '{url}'"),
            ApiOutcome::Failed(e) => return Err(e),
        };

        let next = response
            .headers()
            .get(LINK)
            .and_then(|header| header.to_str().ok())
            .and_then(pagination::next_page_number);

        let bytes = response
            .bytes()
            .await
            .into_app_err_with(|| format!("could not read response body from '{url}'"))?;

        // A success response with an empty body is a page with zero items
        let items = if bytes.is_empty() {
            Vec::new()
        } else {
            serde_json::from_slice(&bytes).into_app_err_with(|| format!("malformed JSON in response from '{url}'"))?
        };

        Ok(Page { items, next })
    }

    /// Issue a GET request and classify the response.
    async fn api_call(&self, url: &str) -> Result<ApiOutcome> {
        log::debug!(target: LOG_TARGET, "Issuing GitHub API request to '{url}'");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .into_app_err_with(|| format!("could not reach '{url}'"))?;

        let status = response.status();
        if status.is_success() {
            Ok(ApiOutcome::Success(response))
        } else if status == StatusCode::NOT_FOUND {
            Ok(ApiOutcome::NotFound)
        } else {
            Ok(ApiOutcome::Failed(ohno::app_err!(
                "GitHub API request failed with status code {status} for '{url}'"
            )))
        }
    }
}
