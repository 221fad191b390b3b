pub mod models;

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
pub use models::{Account, PullRequest};
use models::{ErrorResponse, Page};

/// Page size for the open pull request listing. Only the first page is read.
pub const PULL_REQUEST_PAGE_LEN: u32 = 50;

/// Outcome of fetching one repository's open pull requests.
#[derive(Debug, Clone)]
pub enum RepoFetch {
    Fetched(Vec<PullRequest>),
    Skipped(SkipReason),
}

/// Why a repository contributed no pull requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 404 from the provider.
    NotFound,
    /// 400 from the provider, with its message.
    BadRequest(String),
    /// Any other status, transport failure or undecodable body.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "repository not found"),
            SkipReason::BadRequest(msg) => write!(f, "bad request: {msg}"),
            SkipReason::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

/// Where pull requests come from. The run only needs these two calls.
#[allow(async_fn_in_trait)]
pub trait PullRequestSource {
    /// Workspace the source reads from, for display.
    fn workspace(&self) -> &str;

    /// Cheap authenticated request against the workspace. Never errors; failures are logged.
    async fn test_connection(&self) -> bool;

    /// Open pull requests for one repository, first page only.
    async fn fetch_pull_requests(&self, repo: &str) -> RepoFetch;
}

/// Authenticated client for the Bitbucket Cloud 2.0 REST API.
pub struct BitbucketClient {
    http: reqwest::Client,
    base_url: Url,
    workspace: String,
    email: String,
    api_token: String,
}

impl BitbucketClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("bitbucket-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            workspace: config.workspace.clone(),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// `{base}/repositories/{workspace}[/{repo}/pullrequests]`, with each
    /// segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::UrlParse(format!("not a base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("repositories")
            .push(&self.workspace)
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, query: &[(&str, String)]) -> Result<reqwest::Response> {
        log::debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .basic_auth(&self.email, Some(&self.api_token))
            .query(query)
            .send()
            .await?;
        Ok(response)
    }

    async fn try_fetch(&self, repo: &str) -> Result<RepoFetch> {
        let url = self.endpoint(&[repo, "pullrequests"])?;
        let query = [
            ("state", "OPEN".to_string()),
            ("pagelen", PULL_REQUEST_PAGE_LEN.to_string()),
        ];
        let response = self.get(url, &query).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(RepoFetch::Skipped(skip_reason(status, &body)));
        }

        let page: Page<PullRequest> = response.json().await?;
        if page.next.is_some() {
            log::debug!(
                "{repo} has more than {PULL_REQUEST_PAGE_LEN} open pull requests; only the first page is counted"
            );
        }
        Ok(RepoFetch::Fetched(page.values))
    }
}

impl PullRequestSource for BitbucketClient {
    fn workspace(&self) -> &str {
        &self.workspace
    }

    async fn test_connection(&self) -> bool {
        let url = match self.endpoint(&[]) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Failed to connect to workspace {}: {e}", self.workspace);
                return false;
            }
        };

        match self.get(url, &[("pagelen", "1".to_string())]).await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                log::error!(
                    "Failed to connect to workspace {} (status {}): {}",
                    self.workspace,
                    status.as_u16(),
                    connection_failure_message(&body)
                );
                false
            }
            Err(e) => {
                log::error!("Failed to connect to workspace {}: {e}", self.workspace);
                false
            }
        }
    }

    async fn fetch_pull_requests(&self, repo: &str) -> RepoFetch {
        match self.try_fetch(repo).await {
            Ok(RepoFetch::Fetched(prs)) => RepoFetch::Fetched(prs),
            Ok(RepoFetch::Skipped(reason)) => {
                match &reason {
                    SkipReason::NotFound => log::warn!("Repository not found: {repo}"),
                    SkipReason::BadRequest(msg) => {
                        log::warn!("Bad request for repository {repo}: {msg}")
                    }
                    SkipReason::Failed(msg) => log::error!("API error for {repo}: {msg}"),
                }
                RepoFetch::Skipped(reason)
            }
            Err(e) => {
                log::error!("API error for {repo}: {e}");
                RepoFetch::Skipped(SkipReason::Failed(e.to_string()))
            }
        }
    }
}

/// Provider message for a rejected connection check.
fn connection_failure_message(body: &str) -> String {
    ErrorResponse::message_from_body(body).unwrap_or_else(|| "Unknown error".to_string())
}

/// Map a non-success response to the per-repository skip policy.
fn skip_reason(status: StatusCode, body: &str) -> SkipReason {
    let message = ErrorResponse::message_from_body(body);
    match status {
        StatusCode::NOT_FOUND => SkipReason::NotFound,
        StatusCode::BAD_REQUEST => {
            SkipReason::BadRequest(message.unwrap_or_else(|| "Invalid request".to_string()))
        }
        other => {
            let detail = message.unwrap_or_else(|| body.trim().chars().take(200).collect());
            SkipReason::Failed(format!("status {}: {detail}", other.as_u16()))
        }
    }
}
