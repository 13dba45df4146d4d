//! Dashboard composition: turns caller input into a render descriptor.

pub mod cards;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{OverlayMarker, PartialStats, SeriesCorrelator, Stats, StatsAggregator};
use crate::anomaly::Anomaly;
use crate::series::{self, BaselinePoint, ChartPoint, Tooltip};
use crate::wire;

pub use self::cards::{CardKind, SummaryCard};

pub const DEFAULT_TITLE: &str = "Anomaly Visualization";
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

/// Chart options supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default, deserialize_with = "wire::opt_u32")]
    pub height: Option<u32>,
}

/// Everything a caller can hand to the composer. All fields are optional,
/// and a field of the wrong shape reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardInput {
    #[serde(
        rename = "chartData",
        alias = "chart_data",
        default,
        deserialize_with = "wire::records"
    )]
    pub chart_data: Vec<ChartPoint>,
    #[serde(default, deserialize_with = "wire::records")]
    pub anomalies: Vec<Anomaly>,
    #[serde(default, deserialize_with = "wire::opt_record")]
    pub stats: Option<PartialStats>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub title: Option<String>,
    #[serde(
        rename = "chartConfig",
        alias = "chart_config",
        default,
        deserialize_with = "wire::opt_record"
    )]
    pub chart_config: Option<ChartOptions>,
}

/// Resolved chart sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub height: u32,
}

/// Render-ready layout consumed by the charting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderDescriptor {
    pub title: String,
    pub chart: ChartLayout,
    pub series: Vec<ChartPoint>,
    pub baseline: Vec<BaselinePoint>,
    pub markers: Vec<OverlayMarker>,
    pub cards: Vec<SummaryCard>,
    pub stats: Stats,
    pub axis_labels: Vec<String>,
    pub tooltips: Vec<Tooltip>,
}

/// Builds render descriptors. Holds only the fallback title and height.
#[derive(Debug, Clone, PartialEq)]
pub struct Composer {
    default_title: String,
    default_height: u32,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            default_height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl Composer {
    pub fn new(default_title: impl Into<String>, default_height: u32) -> Self {
        Self {
            default_title: default_title.into(),
            default_height,
        }
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    /// Resolve summary statistics only.
    pub fn stats(&self, input: &DashboardInput) -> Stats {
        StatsAggregator::compute_stats(&input.anomalies, input.stats.as_ref())
    }

    /// Compose a descriptor. Never fails; missing pieces fall back to
    /// defaults and empty input yields an empty chart with zeroed cards.
    pub fn compose(&self, input: &DashboardInput) -> RenderDescriptor {
        let title = input
            .title
            .clone()
            .unwrap_or_else(|| self.default_title.clone());
        let stats = self.stats(input);
        let markers = SeriesCorrelator::place_overlays(&input.chart_data, &input.anomalies);
        let height = input
            .chart_config
            .and_then(|c| c.height)
            .unwrap_or(self.default_height);

        debug!(
            points = input.chart_data.len(),
            anomalies = input.anomalies.len(),
            markers = markers.len(),
            total = stats.total,
            "composed dashboard"
        );

        RenderDescriptor {
            title,
            chart: ChartLayout { height },
            series: input.chart_data.clone(),
            baseline: series::baseline_series(&input.chart_data),
            markers,
            cards: SummaryCard::from_stats(&stats),
            stats,
            axis_labels: series::axis_labels(&input.chart_data),
            tooltips: series::tooltips(&input.chart_data),
        }
    }
}
