use crate::anomaly::{Anomaly, AnomalyKind};
use crate::wire;
use serde::{Deserialize, Serialize};

/// Caller-supplied summary values. Any field may be omitted; counts that are
/// not non-negative whole numbers read as omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialStats {
    #[serde(default, deserialize_with = "wire::opt_count")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "wire::opt_count")]
    pub spike_count: Option<u64>,
    #[serde(default, deserialize_with = "wire::opt_count")]
    pub drop_count: Option<u64>,
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub max_deviation: Option<f64>,
}

/// Resolved summary for the dashboard cards.
///
/// `spike_count + drop_count` may be less than `total`: anomalies of an
/// unrecognized kind count toward the total only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: u64,
    pub spike_count: u64,
    pub drop_count: u64,
    pub max_deviation: f64,
}

/// Resolve summary statistics from anomaly records and optional overrides.
pub struct StatsAggregator;

impl StatsAggregator {
    /// Every field falls back independently: supplied value first, otherwise
    /// computed from `anomalies`. `max_deviation` is never computed here and
    /// defaults to zero.
    pub fn compute_stats(anomalies: &[Anomaly], partial: Option<&PartialStats>) -> Stats {
        let partial = partial.copied().unwrap_or_default();

        Stats {
            total: partial.total.unwrap_or(anomalies.len() as u64),
            spike_count: partial
                .spike_count
                .unwrap_or_else(|| Self::count_kind(anomalies, AnomalyKind::is_spike)),
            drop_count: partial
                .drop_count
                .unwrap_or_else(|| Self::count_kind(anomalies, AnomalyKind::is_drop)),
            max_deviation: partial.max_deviation.unwrap_or(0.0),
        }
    }

    fn count_kind(anomalies: &[Anomaly], is_kind: fn(&AnomalyKind) -> bool) -> u64 {
        anomalies.iter().filter(|a| is_kind(&a.anomaly_type)).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Anomaly> {
        vec![
            Anomaly::new("a", "click_spike"),
            Anomaly::new("b", "click_spike"),
            Anomaly::new("c", "click_drop"),
            Anomaly::new("d", "unknown"),
        ]
    }

    #[test]
    fn test_computed_from_anomalies() {
        let stats = StatsAggregator::compute_stats(&sample(), None);
        assert_eq!(
            stats,
            Stats {
                total: 4,
                spike_count: 2,
                drop_count: 1,
                max_deviation: 0.0,
            }
        );
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let stats = StatsAggregator::compute_stats(&[], None);
        assert_eq!(stats, Stats::default());
        let stats = StatsAggregator::compute_stats(&[], Some(&PartialStats::default()));
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_unknown_kind_not_bucketed() {
        let stats = StatsAggregator::compute_stats(&[Anomaly::new("x", "unknown")], None);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.spike_count, 0);
        assert_eq!(stats.drop_count, 0);
        assert!(stats.spike_count + stats.drop_count < stats.total);
    }

    #[test]
    fn test_partial_override_per_field() {
        let partial = PartialStats {
            total: Some(50),
            max_deviation: Some(3.5),
            ..Default::default()
        };
        let stats = StatsAggregator::compute_stats(&sample(), Some(&partial));
        assert_eq!(stats.total, 50);
        assert_eq!(stats.spike_count, 2);
        assert_eq!(stats.drop_count, 1);
        assert_eq!(stats.max_deviation, 3.5);
    }

    #[test]
    fn test_supplied_zero_is_respected() {
        let partial = PartialStats {
            spike_count: Some(0),
            ..Default::default()
        };
        let stats = StatsAggregator::compute_stats(&sample(), Some(&partial));
        assert_eq!(stats.spike_count, 0);
        assert_eq!(stats.total, 4);
    }

    #[test]
    fn test_unusable_overrides_fall_back() {
        let partial: PartialStats = serde_json::from_str(
            r#"{"total": 3.0, "spike_count": -1, "drop_count": 1.5, "max_deviation": "big"}"#,
        )
        .unwrap();
        assert_eq!(partial.total, Some(3));
        assert_eq!(partial.spike_count, None);
        assert_eq!(partial.drop_count, None);
        assert_eq!(partial.max_deviation, None);

        let stats = StatsAggregator::compute_stats(&sample(), Some(&partial));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.spike_count, 2);
        assert_eq!(stats.drop_count, 1);
        assert_eq!(stats.max_deviation, 0.0);
    }

    #[test]
    fn test_total_tracks_length() {
        for n in 0..20 {
            let anomalies: Vec<Anomaly> = (0..n)
                .map(|i| Anomaly::new(format!("a{}", i), if i % 3 == 0 { "click_drop" } else { "other" }))
                .collect();
            assert_eq!(StatsAggregator::compute_stats(&anomalies, None).total, n as u64);
        }
    }
}
