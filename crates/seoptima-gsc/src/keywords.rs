//! Keyword extraction: resolve the user's site to a verified property, query
//! candidates in order, and turn the first non-empty result into keyword
//! records.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use seoptima_core::{
    keyword_stats, resolve, round_to, sort_by_volume, KeywordRecord, KeywordStats, Property,
};

use crate::client::GscClient;
use crate::error::GscError;
use crate::types::{ApiRow, SearchAnalyticsRequest};

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `days` days up to and including `today`.
    #[must_use]
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    #[must_use]
    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    #[must_use]
    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub date_range: DateRange,
    pub row_limit: u32,
}

/// Keywords for the property that answered, with summary statistics.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordReport {
    pub property: String,
    pub date_range: DateRange,
    pub keywords: Vec<KeywordRecord>,
    pub stats: KeywordStats,
}

/// Maps query+page rows to keyword records, highest volume first.
///
/// Rows without a query key are dropped. Rows without a page key are
/// attributed to `queried_site`.
#[must_use]
pub fn rows_to_keywords(rows: &[ApiRow], queried_site: &str) -> Vec<KeywordRecord> {
    let mut keywords: Vec<KeywordRecord> = rows
        .iter()
        .filter_map(|row| {
            let keyword = row.keys.first()?.clone();
            let url = row
                .keys
                .get(1)
                .cloned()
                .unwrap_or_else(|| queried_site.to_owned());
            Some(KeywordRecord {
                keyword,
                volume: whole(row.impressions),
                position: round_to(row.position, 1),
                url,
                clicks: whole(row.clicks),
                ctr: round_to(row.ctr * 100.0, 2),
            })
        })
        .collect();
    sort_by_volume(&mut keywords);
    keywords
}

/// Truncates a non-negative API count to an integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

/// Fetches keyword data for the site the user typed.
///
/// Candidates from the resolver are queried in order and the first one with
/// rows wins. An API error on one candidate is logged and the next candidate
/// is tried. When no candidate has rows, the report is empty and names the
/// first candidate that answered; when every candidate failed, the last error
/// is returned.
///
/// # Errors
///
/// - [`GscError::Resolve`] if no verified property matches `user_input`.
/// - Any [`GscError`] from listing sites, or from the last candidate when all
///   candidates failed.
pub async fn fetch_keywords(
    client: &GscClient,
    user_input: &str,
    options: &FetchOptions,
) -> Result<KeywordReport, GscError> {
    let verified = client.verified_properties().await?;
    let candidates = resolve(user_input, verified.as_slice())?;

    let request = SearchAnalyticsRequest::keywords(
        options.date_range.start_str(),
        options.date_range.end_str(),
        options.row_limit,
    );

    let mut first_empty: Option<&Property> = None;
    let mut last_error: Option<GscError> = None;

    for candidate in candidates.iter().copied() {
        match client.query_search_analytics(candidate, &request).await {
            Ok(rows) if !rows.is_empty() => {
                tracing::info!(
                    input = user_input,
                    property = %candidate,
                    rows = rows.len(),
                    "fetched keywords"
                );
                return Ok(report(candidate, options.date_range, &rows));
            }
            Ok(_) => {
                tracing::info!(property = %candidate, "property returned no rows; trying next candidate");
                first_empty.get_or_insert(candidate);
            }
            Err(e @ GscError::Api { .. }) => {
                tracing::warn!(property = %candidate, error = %e, "query failed; trying next candidate");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    match (first_empty, last_error) {
        (Some(property), _) => Ok(report(property, options.date_range, &[])),
        (None, Some(err)) => Err(err),
        // resolve() never returns an empty candidate list.
        (None, None) => Ok(report(candidates[0], options.date_range, &[])),
    }
}

fn report(property: &Property, date_range: DateRange, rows: &[ApiRow]) -> KeywordReport {
    let keywords = rows_to_keywords(rows, property.as_str());
    let stats = keyword_stats(&keywords);
    KeywordReport {
        property: property.as_str().to_owned(),
        date_range,
        keywords,
        stats,
    }
}
