//! Google Search Console API client and keyword extraction.

pub mod client;
pub mod error;
pub mod keywords;
pub(crate) mod retry;
pub mod types;

pub use client::{ClientSettings, GscClient};
pub use error::GscError;
pub use keywords::{fetch_keywords, rows_to_keywords, DateRange, FetchOptions, KeywordReport};
pub use types::{
    ApiRow, PermissionLevel, SearchAnalyticsRequest, SearchAnalyticsResponse, SiteEntry,
    SitesListResponse,
};
