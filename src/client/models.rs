use serde::Deserialize;

/// A Bitbucket account as embedded in pull request payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl Account {
    /// Display name, falling back to the account handle.
    pub fn name(&self) -> Option<&str> {
        [&self.display_name, &self.username, &self.nickname]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestLinks {
    #[serde(default)]
    pub html: Option<Link>,
}

/// An open pull request as returned by `/pullrequests`.
///
/// Every field is optional so that one odd record does not fail decoding of
/// the whole page; validation happens when the record is folded into stats.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<Account>,
    #[serde(default)]
    pub reviewers: Option<Vec<Account>>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub additions: Option<u64>,
    #[serde(default)]
    pub deletions: Option<u64>,
    #[serde(default)]
    pub links: Option<PullRequestLinks>,
}

impl PullRequest {
    pub fn html_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.html.as_ref())
            .and_then(|l| l.href.as_deref())
            .filter(|href| !href.is_empty())
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// One page of a paginated Bitbucket listing.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Error envelope: `{"type": "error", "error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Extract `error.message` from a response body, if present.
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error.message)
            .filter(|m| !m.is_empty())
    }
}
