//! Summary statistics and overlay placement over anomaly records.

pub mod aggregator;
pub mod correlation;

pub use self::aggregator::{PartialStats, Stats, StatsAggregator};
pub use self::correlation::{MarkerStyle, MarkerVariant, OverlayMarker, SeriesCorrelator};
