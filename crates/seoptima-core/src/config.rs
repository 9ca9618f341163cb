use crate::app_config::{AppConfig, Environment, ACCESS_TOKEN_VAR};
use crate::ConfigError;

pub const DEFAULT_GSC_API_BASE_URL: &str = "https://www.googleapis.com/webmasters/v3/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SEOPTIMA_ENV", "development"));
    let log_level = or_default("SEOPTIMA_LOG_LEVEL", "info");

    let gsc_access_token = lookup(ACCESS_TOKEN_VAR).ok().filter(|t| !t.trim().is_empty());
    let gsc_api_base_url = or_default("GSC_API_BASE_URL", DEFAULT_GSC_API_BASE_URL);
    let gsc_request_timeout_secs = parse_u64("GSC_REQUEST_TIMEOUT_SECS", "30")?;
    let gsc_user_agent = or_default("GSC_USER_AGENT", "seoptima/0.1 (search-console)");
    let gsc_max_retries = parse_u32("GSC_MAX_RETRIES", "3")?;
    let gsc_retry_backoff_base_ms = parse_u64("GSC_RETRY_BACKOFF_BASE_MS", "1000")?;
    let gsc_lookback_days = parse_u32("GSC_LOOKBACK_DAYS", "90")?;
    let gsc_row_limit = parse_u32("GSC_ROW_LIMIT", "100")?;

    if gsc_row_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GSC_ROW_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        gsc_access_token,
        gsc_api_base_url,
        gsc_request_timeout_secs,
        gsc_user_agent,
        gsc_max_retries,
        gsc_retry_backoff_base_ms,
        gsc_lookback_days,
        gsc_row_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
