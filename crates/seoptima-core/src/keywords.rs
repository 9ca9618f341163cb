use serde::{Deserialize, Serialize};

/// One ranking keyword for a property.
///
/// `volume` is the impression count for the period; `ctr` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub volume: u64,
    pub position: f64,
    pub url: String,
    pub clicks: u64,
    pub ctr: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub total_keywords: usize,
    pub top_3_positions: usize,
    pub top_10_positions: usize,
    pub top_20_positions: usize,
    pub total_volume: u64,
    pub avg_position: f64,
    pub total_clicks: u64,
}

/// Summarizes ranking positions, impressions and clicks.
#[must_use]
pub fn keyword_stats(keywords: &[KeywordRecord]) -> KeywordStats {
    let ranked_within = |limit: f64| keywords.iter().filter(|k| k.position <= limit).count();

    let avg_position = if keywords.is_empty() {
        0.0
    } else {
        // Keyword counts stay far below f64's exact-integer range.
        #[allow(clippy::cast_precision_loss)]
        let count = keywords.len() as f64;
        round_to(keywords.iter().map(|k| k.position).sum::<f64>() / count, 1)
    };

    KeywordStats {
        total_keywords: keywords.len(),
        top_3_positions: ranked_within(3.0),
        top_10_positions: ranked_within(10.0),
        top_20_positions: ranked_within(20.0),
        total_volume: keywords.iter().map(|k| k.volume).sum(),
        avg_position,
        total_clicks: keywords.iter().map(|k| k.clicks).sum(),
    }
}

/// Sorts by volume, highest first. Equal volumes keep their order.
pub fn sort_by_volume(keywords: &mut [KeywordRecord]) {
    keywords.sort_by(|a, b| b.volume.cmp(&a.volume));
}

/// Rounds to `decimals` places, ties to even (`4.25` becomes `4.2`).
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keyword: &str, volume: u64, position: f64, clicks: u64) -> KeywordRecord {
        KeywordRecord {
            keyword: keyword.to_owned(),
            volume,
            position,
            url: "https://example.com/".to_owned(),
            clicks,
            ctr: 0.0,
        }
    }

    #[test]
    fn stats_of_empty_list_are_zero() {
        assert_eq!(keyword_stats(&[]), KeywordStats::default());
    }

    #[test]
    fn stats_bucket_positions_inclusively() {
        let keywords = vec![
            record("a", 100, 1.0, 10),
            record("b", 50, 3.0, 4),
            record("c", 20, 10.0, 1),
            record("d", 10, 15.5, 0),
            record("e", 5, 20.0, 0),
            record("f", 1, 42.0, 0),
        ];
        let stats = keyword_stats(&keywords);
        assert_eq!(stats.total_keywords, 6);
        assert_eq!(stats.top_3_positions, 2);
        assert_eq!(stats.top_10_positions, 3);
        assert_eq!(stats.top_20_positions, 5);
        assert_eq!(stats.total_volume, 186);
        assert_eq!(stats.total_clicks, 15);
        assert!((stats.avg_position - 15.2).abs() < f64::EPSILON);
    }

    #[test]
    fn sort_by_volume_is_descending_and_stable() {
        let mut keywords = vec![
            record("low", 5, 1.0, 0),
            record("tie-first", 50, 1.0, 0),
            record("high", 500, 1.0, 0),
            record("tie-second", 50, 1.0, 0),
        ];
        sort_by_volume(&mut keywords);
        let order: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(order, vec!["high", "tie-first", "tie-second", "low"]);
    }

    #[test]
    fn round_to_handles_one_and_two_places() {
        assert!((round_to(4.26, 1) - 4.3).abs() < f64::EPSILON);
        assert!((round_to(12.345_678, 2) - 12.35).abs() < 1e-9);
    }

    #[test]
    fn round_to_breaks_ties_to_even() {
        assert!((round_to(4.25, 1) - 4.2).abs() < f64::EPSILON);
        assert!((round_to(4.75, 1) - 4.8).abs() < f64::EPSILON);
        assert!((round_to(0.125, 2) - 0.12).abs() < f64::EPSILON);
        assert!((round_to(2.5, 0) - 2.0).abs() < f64::EPSILON);
    }
}
