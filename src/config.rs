use url::Url;

use crate::error::{Error, Result};

pub const WORKSPACE_VAR: &str = "BITBUCKET_WORKSPACE";
pub const EMAIL_VAR: &str = "BITBUCKET_EMAIL";
pub const API_TOKEN_VAR: &str = "BITBUCKET_API_TOKEN";
pub const API_URL_VAR: &str = "BITBUCKET_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.bitbucket.org/2.0";

const REQUIRED_VARS: [&str; 3] = [WORKSPACE_VAR, EMAIL_VAR, API_TOKEN_VAR];

/// Credentials and target workspace for the Bitbucket API.
#[derive(Clone)]
pub struct Config {
    pub workspace: String,
    pub email: String,
    pub api_token: String,
    pub base_url: Url,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// All three required variables must be present and non-empty. When any
    /// is missing the error names every required variable, not only the
    /// missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let (Some(workspace), Some(email), Some(api_token)) =
            (get(WORKSPACE_VAR), get(EMAIL_VAR), get(API_TOKEN_VAR))
        else {
            let listed: Vec<String> = REQUIRED_VARS.iter().map(|v| format!("- {v}")).collect();
            return Err(Error::Config(format!(
                "Missing required environment variables:\n{}",
                listed.join("\n")
            )));
        };

        let raw_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(raw_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::UrlParse(format!("not a base URL: {raw_url}")));
        }

        Ok(Self {
            workspace,
            email,
            api_token,
            base_url,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("workspace", &self.workspace)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_all_present() {
        let config = Config::from_lookup(lookup(&[
            (WORKSPACE_VAR, "acme"),
            (EMAIL_VAR, "dev@acme.io"),
            (API_TOKEN_VAR, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.workspace, "acme");
        assert_eq!(config.email, "dev@acme.io");
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.base_url.as_str(), "https://api.bitbucket.org/2.0");
    }

    #[test]
    fn test_missing_token_lists_every_variable() {
        let err = Config::from_lookup(lookup(&[
            (WORKSPACE_VAR, "acme"),
            (EMAIL_VAR, "dev@acme.io"),
        ]))
        .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, Error::Config(_)));
        assert!(msg.contains(WORKSPACE_VAR));
        assert!(msg.contains(EMAIL_VAR));
        assert!(msg.contains(API_TOKEN_VAR));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let result = Config::from_lookup(lookup(&[
            (WORKSPACE_VAR, "   "),
            (EMAIL_VAR, "dev@acme.io"),
            (API_TOKEN_VAR, "secret"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_values_are_trimmed() {
        let config = Config::from_lookup(lookup(&[
            (WORKSPACE_VAR, "acme\n"),
            (EMAIL_VAR, "  dev@acme.io"),
            (API_TOKEN_VAR, "secret\r\n"),
            (API_URL_VAR, " https://api.bitbucket.org/2.0\n"),
        ]))
        .unwrap();
        assert_eq!(config.workspace, "acme");
        assert_eq!(config.email, "dev@acme.io");
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.base_url.as_str(), "https://api.bitbucket.org/2.0");
    }

    #[test]
    fn test_api_url_override() {
        let config = Config::from_lookup(lookup(&[
            (WORKSPACE_VAR, "acme"),
            (EMAIL_VAR, "dev@acme.io"),
            (API_TOKEN_VAR, "secret"),
            (API_URL_VAR, "http://localhost:8080/2.0/"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/2.0");
    }

    #[test]
    fn test_invalid_api_url() {
        let result = Config::from_lookup(lookup(&[
            (WORKSPACE_VAR, "acme"),
            (EMAIL_VAR, "dev@acme.io"),
            (API_TOKEN_VAR, "secret"),
            (API_URL_VAR, "not a url"),
        ]));
        assert!(matches!(result, Err(Error::UrlParse(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_lookup(lookup(&[
            (WORKSPACE_VAR, "acme"),
            (EMAIL_VAR, "dev@acme.io"),
            (API_TOKEN_VAR, "secret"),
        ]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
    }
}
