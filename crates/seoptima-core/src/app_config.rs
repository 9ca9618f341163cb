use crate::ConfigError;

pub const ACCESS_TOKEN_VAR: &str = "GSC_ACCESS_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub gsc_access_token: Option<String>,
    pub gsc_api_base_url: String,
    pub gsc_request_timeout_secs: u64,
    pub gsc_user_agent: String,
    pub gsc_max_retries: u32,
    pub gsc_retry_backoff_base_ms: u64,
    pub gsc_lookback_days: u32,
    pub gsc_row_limit: u32,
}

impl AppConfig {
    /// Returns the configured OAuth access token.
    ///
    /// The token is optional at load time so that offline commands work
    /// without credentials; commands that talk to Search Console call this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `GSC_ACCESS_TOKEN` is unset
    /// or blank.
    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        self.gsc_access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(ACCESS_TOKEN_VAR.to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "gsc_access_token",
                &self.gsc_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("gsc_api_base_url", &self.gsc_api_base_url)
            .field("gsc_request_timeout_secs", &self.gsc_request_timeout_secs)
            .field("gsc_user_agent", &self.gsc_user_agent)
            .field("gsc_max_retries", &self.gsc_max_retries)
            .field("gsc_retry_backoff_base_ms", &self.gsc_retry_backoff_base_ms)
            .field("gsc_lookback_days", &self.gsc_lookback_days)
            .field("gsc_row_limit", &self.gsc_row_limit)
            .finish()
    }
}
