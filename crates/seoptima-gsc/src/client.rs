//! HTTP client for the Google Search Console (`webmasters/v3`) REST API.
//!
//! Wraps `reqwest` with bearer-token auth, Google error-envelope handling,
//! retry on transient failures, and typed response deserialization.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use seoptima_core::{AppConfig, Property, VerifiedProperties};

use crate::error::GscError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ApiRow, ErrorEnvelope, SearchAnalyticsRequest, SearchAnalyticsResponse, SiteEntry,
    SitesListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/webmasters/v3/";

/// Characters left as-is when a site URL is embedded as a path segment
/// (the `encodeURIComponent` unreserved set).
const SITE_URL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Transport settings for [`GscClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl ClientSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.gsc_request_timeout_secs,
            user_agent: config.gsc_user_agent.clone(),
            max_retries: config.gsc_max_retries,
            backoff_base_ms: config.gsc_retry_backoff_base_ms,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "seoptima/0.1 (search-console)".to_owned(),
            max_retries: 3,
            backoff_base_ms: 1_000,
        }
    }
}

/// Client for the Search Console REST API.
///
/// Use [`GscClient::new`] for production or [`GscClient::with_base_url`] to
/// point at a mock server in tests.
pub struct GscClient {
    client: Client,
    access_token: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GscClient {
    /// Creates a client pointed at the production Search Console API.
    ///
    /// # Errors
    ///
    /// Returns [`GscError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(access_token: &str, settings: &ClientSettings) -> Result<Self, GscError> {
        Self::with_base_url(access_token, settings, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API root.
    ///
    /// # Errors
    ///
    /// Returns [`GscError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`GscError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        access_token: &str,
        settings: &ClientSettings,
        base_url: &str,
    ) -> Result<Self, GscError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        // Exactly one trailing slash, so relative joins append to the root
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GscError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    /// Lists every site attached to the account, verified or not.
    ///
    /// # Errors
    ///
    /// - [`GscError::Api`] on a non-2xx status.
    /// - [`GscError::Http`] on network failure.
    /// - [`GscError::Deserialize`] if the body does not match the expected shape.
    pub async fn list_sites(&self) -> Result<Vec<SiteEntry>, GscError> {
        let url = self.join("sites")?;
        let response: SitesListResponse = self
            .send_json("sites.list", || self.client.get(url.clone()))
            .await?;
        tracing::debug!(count = response.site_entry.len(), "listed Search Console sites");
        Ok(response.site_entry)
    }

    /// Lists the account's sites and keeps the verified ones.
    ///
    /// Entries with permission level `siteUnverifiedUser` and identifiers that
    /// do not parse are dropped.
    ///
    /// # Errors
    ///
    /// Same as [`GscClient::list_sites`].
    pub async fn verified_properties(&self) -> Result<VerifiedProperties, GscError> {
        let sites = self.list_sites().await?;
        let verified = sites.iter().filter_map(|site| {
            if site.permission_level.is_verified() {
                Some(site.site_url.as_str())
            } else {
                tracing::info!(site_url = %site.site_url, "skipping unverified property");
                None
            }
        });
        Ok(VerifiedProperties::from_identifiers(verified))
    }

    /// Runs a search-analytics query against one property.
    ///
    /// An empty vector means the property has no data for the period.
    ///
    /// # Errors
    ///
    /// - [`GscError::Api`] on a non-2xx status (403 when the token's account
    ///   has no access to `property`).
    /// - [`GscError::Http`] on network failure.
    /// - [`GscError::Deserialize`] if the body does not match the expected shape.
    pub async fn query_search_analytics(
        &self,
        property: &Property,
        request: &SearchAnalyticsRequest,
    ) -> Result<Vec<ApiRow>, GscError> {
        let url = self.search_analytics_url(property.as_str())?;
        let context = format!("searchAnalytics.query({property})");
        let response: SearchAnalyticsResponse = self
            .send_json(&context, || self.client.post(url.clone()).json(request))
            .await?;
        tracing::debug!(
            property = %property,
            rows = response.rows.len(),
            "search analytics query complete"
        );
        Ok(response.rows)
    }

    fn search_analytics_url(&self, site_url: &str) -> Result<Url, GscError> {
        let encoded = utf8_percent_encode(site_url, SITE_URL_SEGMENT);
        self.join(&format!("sites/{encoded}/searchAnalytics/query"))
    }

    fn join(&self, relative: &str) -> Result<Url, GscError> {
        self.base_url
            .join(relative)
            .map_err(|e| GscError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{relative}': {e}"),
            })
    }

    /// Sends the request built by `build` with bearer auth, retrying on
    /// transient failures, and decodes a 2xx JSON body into `T`.
    async fn send_json<T, B>(&self, context: &str, build: B) -> Result<T, GscError>
    where
        T: DeserializeOwned,
        B: Fn() -> RequestBuilder,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = build().bearer_auth(&self.access_token);
            async move {
                let response = request.send().await?;
                let status = response.status();
                let body = response.text().await?;

                if !status.is_success() {
                    return Err(GscError::Api {
                        status: status.as_u16(),
                        context: context.to_owned(),
                        message: error_message(&body, status),
                    });
                }

                serde_json::from_str(&body).map_err(|e| GscError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

/// Pulls `error.message` out of a Google error envelope, falling back to the
/// status reason phrase.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_owned()
        })
}
