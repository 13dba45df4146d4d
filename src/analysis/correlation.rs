use crate::anomaly::{Anomaly, AnomalyKind};
use crate::series::ChartPoint;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Marker styling bucket. Only spikes get the spike style; every other kind,
/// recognized or not, is drawn as a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerVariant {
    Spike,
    Drop,
}

impl MarkerVariant {
    pub fn for_kind(kind: &AnomalyKind) -> Self {
        if kind.is_spike() {
            MarkerVariant::Spike
        } else {
            MarkerVariant::Drop
        }
    }

    pub fn style(self) -> MarkerStyle {
        match self {
            MarkerVariant::Spike => MarkerStyle {
                stroke: "#fc8181",
                fill: "#feb2b2",
                ..MarkerStyle::BASE
            },
            MarkerVariant::Drop => MarkerStyle {
                stroke: "#4fd1c5",
                fill: "#9decf9",
                ..MarkerStyle::BASE
            },
        }
    }
}

/// Drawing attributes handed to the charting layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub stroke: &'static str,
    pub fill: &'static str,
    pub radius: u32,
    pub stroke_width: u32,
    pub in_front: bool,
}

impl MarkerStyle {
    const BASE: MarkerStyle = MarkerStyle {
        stroke: "",
        fill: "",
        radius: 8,
        stroke_width: 3,
        in_front: true,
    };
}

/// A point annotation flagging one anomaly on the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayMarker {
    /// Bucket key, matched by the charting layer against the series' `hour`.
    pub x: String,
    pub y: f64,
    pub variant: MarkerVariant,
    pub label: String,
    pub style: MarkerStyle,
}

impl OverlayMarker {
    pub fn from_anomaly(anomaly: &Anomaly) -> Self {
        let variant = MarkerVariant::for_kind(&anomaly.anomaly_type);
        Self {
            x: anomaly.bucket_key(),
            y: anomaly.clicks.unwrap_or(0.0),
            variant,
            label: anomaly.name.clone(),
            style: variant.style(),
        }
    }

    /// Whether this marker's key exists in the series' x-domain.
    pub fn aligns_with(&self, points: &[ChartPoint]) -> bool {
        points.iter().any(|p| p.key() == self.x)
    }
}

/// Associates anomalies with the series points they are drawn over.
pub struct SeriesCorrelator;

impl SeriesCorrelator {
    /// One marker per anomaly, in input order. Missing data never drops a
    /// marker: an absent hour yields the empty key and absent clicks yield 0.
    ///
    /// Markers whose key is not in the series still get emitted; the charting
    /// layer will fail to place them, so they are only counted for logging.
    pub fn place_overlays(points: &[ChartPoint], anomalies: &[Anomaly]) -> Vec<OverlayMarker> {
        let markers: Vec<OverlayMarker> = anomalies.iter().map(OverlayMarker::from_anomaly).collect();

        let domain: HashSet<String> = points.iter().map(ChartPoint::key).collect();
        let unaligned = markers
            .iter()
            .filter(|m| !domain.contains(&m.x))
            .count();
        if unaligned > 0 {
            debug!(
                unaligned,
                markers = markers.len(),
                "overlay markers without a matching series bucket"
            );
        }

        markers
    }
}
