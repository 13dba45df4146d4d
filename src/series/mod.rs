//! Time-series points, bucket keys, and the per-point views derived from them.

pub mod format;

use serde::{Deserialize, Deserializer, Serialize};

use crate::wire;

pub use self::format::{format_count, format_hour};

/// A time-bucket key as it may arrive on the wire: text, a number, or a flag.
///
/// Upstream producers are not consistent about how they encode hours, so a
/// key is kept in its raw form until it is normalized with [`BucketKey::to_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketKey {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl BucketKey {
    /// Read a key from any JSON value; `null` is no key.
    pub fn from_value(value: &serde_json::Value) -> Option<BucketKey> {
        use serde_json::Value;
        match value {
            Value::Null => None,
            Value::String(s) => Some(BucketKey::Text(s.clone())),
            Value::Number(n) => Some(BucketKey::Number(n.clone())),
            Value::Bool(b) => Some(BucketKey::Flag(*b)),
            other => Some(BucketKey::Text(other.to_string())),
        }
    }

    /// Normalize to the textual key used on the series x-axis.
    pub fn to_key(&self) -> String {
        match self {
            BucketKey::Text(s) => s.clone(),
            BucketKey::Number(n) => wire::number_text(n),
            BucketKey::Flag(b) => b.to_string(),
        }
    }

    /// Empty text, zero, and `false` carry no label.
    pub fn is_falsy(&self) -> bool {
        match self {
            BucketKey::Text(s) => s.is_empty(),
            BucketKey::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
            BucketKey::Flag(b) => !b,
        }
    }
}

impl From<&str> for BucketKey {
    fn from(s: &str) -> Self {
        BucketKey::Text(s.to_string())
    }
}

impl From<i64> for BucketKey {
    fn from(n: i64) -> Self {
        BucketKey::Number(n.into())
    }
}

/// Normalize an optional key; a missing key becomes the empty key.
pub fn normalize_key(key: Option<&BucketKey>) -> String {
    key.map(BucketKey::to_key).unwrap_or_default()
}

/// Axis/tooltip label for an optional key. Missing or falsy keys are blank.
pub fn key_label(key: Option<&BucketKey>) -> String {
    match key {
        Some(k) if !k.is_falsy() => format_hour(&k.to_key()),
        _ => String::new(),
    }
}

pub(crate) fn deserialize_key<'de, D>(deserializer: D) -> Result<Option<BucketKey>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(BucketKey::from_value(&serde_json::Value::deserialize(deserializer)?))
}

/// One time bucket of the click series.
///
/// Fields are kept as supplied so the series passes through unchanged; a
/// field of the wrong type reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(
        default,
        deserialize_with = "deserialize_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub hour: Option<BucketKey>,
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub clicks: Option<f64>,
    #[serde(
        default,
        deserialize_with = "wire::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub baseline: Option<f64>,
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

impl ChartPoint {
    pub fn new(hour: impl Into<BucketKey>, clicks: f64) -> Self {
        Self {
            hour: Some(hour.into()),
            clicks: Some(clicks),
            ..Default::default()
        }
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Normalized x-axis key, the same form overlay markers use.
    pub fn key(&self) -> String {
        normalize_key(self.hour.as_ref())
    }

    pub fn label(&self) -> String {
        key_label(self.hour.as_ref())
    }
}

/// A point of the baseline sub-series. `None` renders as a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselinePoint {
    pub hour: String,
    pub baseline: Option<f64>,
}

/// One named value inside a tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipEntry {
    pub name: String,
    pub value: String,
}

/// Hover content for a single bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub label: String,
    pub entries: Vec<TooltipEntry>,
}

/// Derive the baseline sub-series, one entry per point, gaps kept as `None`.
pub fn baseline_series(points: &[ChartPoint]) -> Vec<BaselinePoint> {
    points
        .iter()
        .map(|p| BaselinePoint {
            hour: p.key(),
            baseline: p.baseline,
        })
        .collect()
}

/// X-axis labels, one per point.
pub fn axis_labels(points: &[ChartPoint]) -> Vec<String> {
    points.iter().map(ChartPoint::label).collect()
}

/// Tooltip content per point: `Clicks` always, `Baseline` only when present.
pub fn tooltips(points: &[ChartPoint]) -> Vec<Tooltip> {
    points
        .iter()
        .map(|p| {
            let mut entries = vec![TooltipEntry {
                name: "Clicks".to_string(),
                value: p.clicks.map(format_count).unwrap_or_default(),
            }];
            if let Some(baseline) = p.baseline {
                entries.push(TooltipEntry {
                    name: "Baseline".to_string(),
                    value: format_count(baseline),
                });
            }
            Tooltip {
                label: p.label(),
                entries,
            }
        })
        .collect()
}
