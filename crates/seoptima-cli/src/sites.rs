//! `properties` and `resolve` command handlers.

use anyhow::Context;
use seoptima_core::{AppConfig, Property, VerifiedProperties};
use seoptima_gsc::{ClientSettings, GscClient, SiteEntry};

/// Builds a Search Console client from config.
///
/// # Errors
///
/// Returns an error if `GSC_ACCESS_TOKEN` is not set or the HTTP client
/// cannot be constructed.
pub(crate) fn build_gsc_client(config: &AppConfig) -> anyhow::Result<GscClient> {
    let token = config.require_access_token()?;
    let client = GscClient::with_base_url(
        token,
        &ClientSettings::from_config(config),
        &config.gsc_api_base_url,
    )?;
    Ok(client)
}

/// List every property on the account with its permission level.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the listing fails.
pub(crate) async fn run_properties(config: &AppConfig) -> anyhow::Result<()> {
    let client = build_gsc_client(config)?;
    let sites = client
        .list_sites()
        .await
        .context("failed to list Search Console properties")?;

    if sites.is_empty() {
        println!("no Search Console properties found on this account");
        return Ok(());
    }

    for line in format_sites(&sites) {
        println!("{line}");
    }
    Ok(())
}

/// Print the candidate list for `site`.
///
/// With `offline_properties` non-empty, resolves against those identifiers
/// and makes no network calls.
///
/// # Errors
///
/// Returns an error if nothing matches, or if fetching the account's
/// properties fails.
pub(crate) async fn run_resolve(
    config: &AppConfig,
    site: &str,
    offline_properties: &[String],
) -> anyhow::Result<()> {
    let verified = if offline_properties.is_empty() {
        build_gsc_client(config)?
            .verified_properties()
            .await
            .context("failed to list Search Console properties")?
    } else {
        VerifiedProperties::from_identifiers(offline_properties)
    };

    tracing::debug!(site, verified = verified.len(), "resolving site");
    let candidates = seoptima_core::resolve(site, verified.as_slice())?;
    for line in format_candidates(&candidates) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn format_sites(sites: &[SiteEntry]) -> Vec<String> {
    let mut lines = vec![format!("{:<4}{:<22}{:<8}PROPERTY", "#", "PERMISSION", "TYPE")];
    lines.extend(sites.iter().enumerate().map(|(i, site)| {
        let kind = match Property::parse(&site.site_url) {
            Ok(p) if p.is_domain() => "domain",
            Ok(_) => "url",
            Err(_) => "?",
        };
        format!(
            "{:<4}{:<22}{:<8}{}",
            i + 1,
            site.permission_level.as_str(),
            kind,
            site.site_url
        )
    }));
    lines
}

pub(crate) fn format_candidates(candidates: &[&Property]) -> Vec<String> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, p.as_str()))
        .collect()
}
