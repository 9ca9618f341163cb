use chrono::NaiveDate;
use seoptima_core::{keyword_stats, KeywordRecord, VerifiedProperties};
use seoptima_gsc::{DateRange, KeywordReport, PermissionLevel, SiteEntry};

use super::*;

fn record(keyword: &str, volume: u64) -> KeywordRecord {
    KeywordRecord {
        keyword: keyword.to_owned(),
        volume,
        position: 4.0,
        url: "https://ciepastpapers.com/".to_owned(),
        clicks: 3,
        ctr: 1.5,
    }
}

fn report(keywords: Vec<KeywordRecord>) -> KeywordReport {
    let stats = keyword_stats(&keywords);
    KeywordReport {
        property: "sc-domain:ciepastpapers.com".to_owned(),
        date_range: DateRange::last_days(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), 90),
        keywords,
        stats,
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["seoptima"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn help_renders_without_loading_config() {
    let err = Cli::try_parse_from(["seoptima", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn parses_properties_command() {
    let cli = Cli::try_parse_from(["seoptima", "properties"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Properties)));
}

#[test]
fn parses_resolve_with_offline_properties() {
    let cli = Cli::try_parse_from([
        "seoptima",
        "resolve",
        "ciepastpapers.com",
        "--property",
        "sc-domain:ciepastpapers.com",
        "--property",
        "https://homeschool.asia/",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Resolve { ref site, ref properties })
            if site == "ciepastpapers.com" && properties.len() == 2
    ));
}

#[test]
fn resolve_requires_site() {
    assert!(Cli::try_parse_from(["seoptima", "resolve"]).is_err());
}

#[test]
fn keywords_defaults() {
    let cli = Cli::try_parse_from(["seoptima", "keywords", "kungfuquiz.com"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Keywords {
            days: None,
            limit: 25,
            json: false,
            ..
        })
    ));
}

#[test]
fn keywords_with_options() {
    let cli = Cli::try_parse_from([
        "seoptima",
        "keywords",
        "kungfuquiz.com",
        "--days",
        "28",
        "--limit",
        "5",
        "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Keywords {
            days: Some(28),
            limit: 5,
            json: true,
            ..
        })
    ));
}

#[test]
fn format_sites_marks_kind_and_permission() {
    let sites = vec![
        SiteEntry {
            site_url: "sc-domain:homeschool.asia".to_owned(),
            permission_level: PermissionLevel::SiteOwner,
        },
        SiteEntry {
            site_url: "https://www.kungfuquiz.com/".to_owned(),
            permission_level: PermissionLevel::SiteUnverifiedUser,
        },
    ];
    let lines = sites::format_sites(&sites);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("siteOwner"));
    assert!(lines[1].contains("domain"));
    assert!(lines[1].ends_with("sc-domain:homeschool.asia"));
    assert!(lines[2].contains("siteUnverifiedUser"));
    assert!(lines[2].contains("url"));
}

#[test]
fn format_candidates_numbers_in_order() {
    let verified = VerifiedProperties::from_identifiers([
        "https://homeschool.asia/",
        "sc-domain:homeschool.asia",
    ]);
    let candidates = seoptima_core::resolve("homeschool.asia", verified.as_slice()).unwrap();
    assert_eq!(
        sites::format_candidates(&candidates),
        vec!["1. sc-domain:homeschool.asia", "2. https://homeschool.asia/"]
    );
}

#[test]
fn format_report_truncates_to_limit() {
    let report = report(vec![record("a", 30), record("b", 20), record("c", 10)]);
    let lines = keywords::format_report(&report, 2);
    assert_eq!(
        lines[0],
        "property: sc-domain:ciepastpapers.com (2026-07-20 to 2026-10-18)"
    );
    assert!(lines[1].starts_with("keywords: 3"));
    assert!(lines.iter().any(|l| l.starts_with("a ")));
    assert!(!lines.iter().any(|l| l.starts_with("c ")));
    assert_eq!(lines.last().unwrap(), "... 1 more (use --limit or --json)");
}

#[test]
fn format_report_without_keywords() {
    let lines = keywords::format_report(&report(Vec::new()), 25);
    assert_eq!(lines.last().unwrap(), "no keyword data for this period");
}
