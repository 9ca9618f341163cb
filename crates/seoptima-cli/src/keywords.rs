use anyhow::Context;
use chrono::Local;
use seoptima_core::AppConfig;
use seoptima_gsc::{fetch_keywords, DateRange, FetchOptions, KeywordReport};

use crate::sites::build_gsc_client;

/// Fetch and print keywords for `site`.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the site resolves to no
/// verified property, or every candidate query fails.
pub(crate) async fn run_keywords(
    config: &AppConfig,
    site: &str,
    days: Option<u32>,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let client = build_gsc_client(config)?;
    let options = FetchOptions {
        date_range: DateRange::last_days(
            Local::now().date_naive(),
            days.unwrap_or(config.gsc_lookback_days),
        ),
        row_limit: config.gsc_row_limit,
    };
    tracing::debug!(
        site,
        start = %options.date_range.start_str(),
        end = %options.date_range.end_str(),
        "fetching keywords"
    );

    let report = fetch_keywords(&client, site, &options).await?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize keyword report")?;
        println!("{rendered}");
    } else {
        for line in format_report(&report, limit) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn format_report(report: &KeywordReport, limit: usize) -> Vec<String> {
    let stats = &report.stats;
    let mut lines = vec![
        format!(
            "property: {} ({} to {})",
            report.property,
            report.date_range.start_str(),
            report.date_range.end_str()
        ),
        format!(
            "keywords: {}  top 3: {}  top 10: {}  top 20: {}",
            stats.total_keywords,
            stats.top_3_positions,
            stats.top_10_positions,
            stats.top_20_positions
        ),
        format!(
            "impressions: {}  clicks: {}  avg position: {:.1}",
            stats.total_volume, stats.total_clicks, stats.avg_position
        ),
    ];

    if report.keywords.is_empty() {
        lines.push("no keyword data for this period".to_owned());
        return lines;
    }

    lines.push(String::new());
    lines.push(format!(
        "{:<40}{:>10}{:>8}{:>8}{:>8}  URL",
        "KEYWORD", "VOLUME", "POS", "CLICKS", "CTR%"
    ));
    for k in report.keywords.iter().take(limit) {
        let keyword = if k.keyword.chars().count() > 38 {
            format!("{}...", k.keyword.chars().take(35).collect::<String>())
        } else {
            k.keyword.clone()
        };
        lines.push(format!(
            "{:<40}{:>10}{:>8.1}{:>8}{:>8.2}  {}",
            keyword, k.volume, k.position, k.clicks, k.ctr, k.url
        ));
    }
    if report.keywords.len() > limit {
        lines.push(format!(
            "... {} more (use --limit or --json)",
            report.keywords.len() - limit
        ));
    }
    lines
}
