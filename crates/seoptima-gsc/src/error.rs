use seoptima_core::ResolveError;
use thiserror::Error;

/// Errors returned by the Search Console client.
#[derive(Debug, Error)]
pub enum GscError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Search Console API error {status} for {context}: {message}")]
    Api {
        status: u16,
        context: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The site string could not be mapped to a verified property.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
