pub mod app_config;
pub mod config;
pub mod keywords;
pub mod property;
pub mod resolver;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{keyword_stats, round_to, sort_by_volume, KeywordRecord, KeywordStats};
pub use property::{
    normalize_site, site_host, Property, PropertyKind, PropertyParseError, Scheme,
    VerifiedProperties,
};
pub use resolver::{generate_candidates, matches_domain, resolve, ResolveError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
