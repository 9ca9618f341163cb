//! Search Console API request and response types.
//!
//! Field names follow the camelCase JSON of the `webmasters/v3` API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// sites.list
// ---------------------------------------------------------------------------

/// Response of `GET sites`. The API omits `siteEntry` when the account has
/// no sites.
#[derive(Debug, Deserialize)]
pub struct SitesListResponse {
    #[serde(rename = "siteEntry", default)]
    pub site_entry: Vec<SiteEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    pub site_url: String,
    pub permission_level: PermissionLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionLevel {
    SiteOwner,
    SiteFullUser,
    SiteRestrictedUser,
    /// Listed for the account but never verified; must not be queried.
    SiteUnverifiedUser,
    #[serde(other)]
    Unknown,
}

impl PermissionLevel {
    #[must_use]
    pub fn is_verified(self) -> bool {
        !matches!(self, PermissionLevel::SiteUnverifiedUser)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::SiteOwner => "siteOwner",
            PermissionLevel::SiteFullUser => "siteFullUser",
            PermissionLevel::SiteRestrictedUser => "siteRestrictedUser",
            PermissionLevel::SiteUnverifiedUser => "siteUnverifiedUser",
            PermissionLevel::Unknown => "unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// searchanalytics.query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsRequest {
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    pub dimensions: Vec<String>,
    pub row_limit: u32,
    pub start_row: u32,
}

impl SearchAnalyticsRequest {
    /// Query + page breakdown, as used for keyword extraction.
    #[must_use]
    pub fn keywords(start_date: String, end_date: String, row_limit: u32) -> Self {
        Self {
            start_date,
            end_date,
            dimensions: vec!["query".to_owned(), "page".to_owned()],
            row_limit,
            start_row: 0,
        }
    }
}

/// Response of `POST sites/{siteUrl}/searchAnalytics/query`. `rows` is
/// absent when the property has no data for the period.
#[derive(Debug, Deserialize)]
pub struct SearchAnalyticsResponse {
    #[serde(default)]
    pub rows: Vec<ApiRow>,
}

/// One aggregated row; `keys` follow the order of the requested dimensions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiRow {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub position: f64,
}

// ---------------------------------------------------------------------------
// errors
// ---------------------------------------------------------------------------

/// Google API error envelope: `{"error": {"code": 403, "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
