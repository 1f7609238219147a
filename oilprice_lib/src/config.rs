//! Run configuration, built once from the environment at process start.

use std::fmt;
use std::path::PathBuf;

use crate::github::RepoTarget;
use crate::retry::RetryPolicy;
use crate::OilDataError;

pub const DEFAULT_REPOSITORY: &str = "oil-price-archive/korea-oil-prices";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_DATA_PATH: &str = "oil_data.csv";

/// Everything a run needs. Nothing downstream reads the environment.
#[derive(Clone)]
pub struct Config {
    pub access_token: String,
    pub opinet_api_key: String,
    /// When unset the run does not populate `Exchange Rate`.
    pub eximbank_api_key: Option<String>,
    /// Optional crude benchmark feed (WTI, Brent, Dubai).
    pub crude_api_url: Option<String>,
    pub repo: RepoTarget,
    /// Object path inside the repository.
    pub remote_path: String,
    pub local_path: PathBuf,
    pub opinet_base_url: Option<String>,
    pub eximbank_base_url: Option<String>,
    /// Overrides api.github.com.
    pub github_api_url: Option<String>,
    pub retry: RetryPolicy,
}

impl Config {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, OilDataError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OilDataError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| OilDataError::Config(format!("{} is not set", key)))
        };

        let slug = get("OIL_DATA_REPOSITORY").unwrap_or_else(|| DEFAULT_REPOSITORY.to_string());
        let branch = get("OIL_DATA_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let repo = RepoTarget::from_slug(&slug, &branch).ok_or_else(|| {
            OilDataError::Config(format!("OIL_DATA_REPOSITORY must be owner/name, got {:?}", slug))
        })?;

        Ok(Self {
            access_token: require("ACCESS_TOKEN")?,
            opinet_api_key: require("OPINET_API_KEY")?,
            eximbank_api_key: get("EXIMBANK_API_KEY"),
            crude_api_url: get("CRUDE_API_URL"),
            repo,
            remote_path: get("OIL_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
            local_path: get("OIL_DATA_LOCAL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            opinet_base_url: get("OPINET_BASE_URL"),
            eximbank_base_url: get("EXIMBANK_BASE_URL"),
            github_api_url: get("GITHUB_API_URL"),
            retry: RetryPolicy::default(),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("access_token", &"<redacted>")
            .field("opinet_api_key", &"<redacted>")
            .field("eximbank_api_key", &redacted(&self.eximbank_api_key))
            .field("crude_api_url", &self.crude_api_url)
            .field("repo", &self.repo)
            .field("remote_path", &self.remote_path)
            .field("local_path", &self.local_path)
            .field("opinet_base_url", &self.opinet_base_url)
            .field("eximbank_base_url", &self.eximbank_base_url)
            .field("github_api_url", &self.github_api_url)
            .field("retry", &self.retry)
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config =
            Config::from_lookup(lookup(&[("ACCESS_TOKEN", "gh"), ("OPINET_API_KEY", "op")])).unwrap();

        assert_eq!(config.access_token, "gh");
        assert_eq!(config.opinet_api_key, "op");
        assert_eq!(config.eximbank_api_key, None);
        assert_eq!(config.crude_api_url, None);
        assert_eq!(config.repo.branch, DEFAULT_BRANCH);
        assert_eq!(config.remote_path, DEFAULT_DATA_PATH);
        assert_eq!(config.local_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.github_api_url, None);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("ACCESS_TOKEN", "gh"),
            ("OPINET_API_KEY", "op"),
            ("EXIMBANK_API_KEY", "ex"),
            ("OIL_DATA_REPOSITORY", "octo/oil-data"),
            ("OIL_DATA_BRANCH", "data"),
            ("OIL_DATA_PATH", "prices/oil_data.csv"),
            ("OIL_DATA_LOCAL_PATH", "/tmp/oil.csv"),
        ]))
        .unwrap();

        assert_eq!(config.eximbank_api_key.as_deref(), Some("ex"));
        assert_eq!(config.repo.to_string(), "octo/oil-data@data");
        assert_eq!(config.remote_path, "prices/oil_data.csv");
        assert_eq!(config.local_path, PathBuf::from("/tmp/oil.csv"));
    }

    #[test]
    fn missing_or_blank_secret_is_config_error() {
        let err = Config::from_lookup(lookup(&[("OPINET_API_KEY", "op")])).unwrap_err();
        assert!(matches!(err, OilDataError::Config(ref m) if m.contains("ACCESS_TOKEN")));

        let err = Config::from_lookup(lookup(&[("ACCESS_TOKEN", "gh"), ("OPINET_API_KEY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, OilDataError::Config(ref m) if m.contains("OPINET_API_KEY")));
    }

    #[test]
    fn bad_repository_slug_is_config_error() {
        let err = Config::from_lookup(lookup(&[
            ("ACCESS_TOKEN", "gh"),
            ("OPINET_API_KEY", "op"),
            ("OIL_DATA_REPOSITORY", "no-slash"),
        ]))
        .unwrap_err();
        assert!(matches!(err, OilDataError::Config(_)));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup(&[
            ("ACCESS_TOKEN", "secret-gh"),
            ("OPINET_API_KEY", "secret-op"),
            ("EXIMBANK_API_KEY", "secret-ex"),
        ]))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-"));
        assert!(debug.contains("<redacted>"));
    }
}
