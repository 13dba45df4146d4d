//! Anomaly records as produced by upstream detection.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::series::{deserialize_key, normalize_key, BucketKey};
use crate::wire;

pub const CLICK_SPIKE: &str = "click_spike";
pub const CLICK_DROP: &str = "click_drop";

/// Classification of an anomaly. The set is open: unrecognized kinds are
/// kept verbatim so they still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnomalyKind {
    Spike,
    Drop,
    Other(String),
}

impl AnomalyKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            CLICK_SPIKE => AnomalyKind::Spike,
            CLICK_DROP => AnomalyKind::Drop,
            other => AnomalyKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AnomalyKind::Spike => CLICK_SPIKE,
            AnomalyKind::Drop => CLICK_DROP,
            AnomalyKind::Other(s) => s,
        }
    }

    pub fn is_spike(&self) -> bool {
        matches!(self, AnomalyKind::Spike)
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, AnomalyKind::Drop)
    }
}

impl Default for AnomalyKind {
    fn default() -> Self {
        AnomalyKind::Other(String::new())
    }
}

impl From<&str> for AnomalyKind {
    fn from(raw: &str) -> Self {
        AnomalyKind::parse(raw)
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AnomalyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Non-string kinds keep their text form and land in `Other`.
impl<'de> Deserialize<'de> for AnomalyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(AnomalyKind::parse(&wire::value_text(&raw)))
    }
}

/// One detected deviation event. Every field is best-effort: missing or
/// wrongly typed values read as their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(default, deserialize_with = "wire::text")]
    pub name: String,
    #[serde(default)]
    pub anomaly_type: AnomalyKind,
    #[serde(default, deserialize_with = "deserialize_key")]
    pub event_hour: Option<BucketKey>,
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub clicks: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub avg_clicks: Option<f64>,
}

impl Anomaly {
    pub fn new(name: impl Into<String>, kind: impl Into<AnomalyKind>) -> Self {
        Self {
            name: name.into(),
            anomaly_type: kind.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, hour: impl Into<BucketKey>) -> Self {
        self.event_hour = Some(hour.into());
        self
    }

    pub fn with_clicks(mut self, clicks: f64) -> Self {
        self.clicks = Some(clicks);
        self
    }

    /// The bucket key this anomaly belongs to, empty when unknown.
    pub fn bucket_key(&self) -> String {
        normalize_key(self.event_hour.as_ref())
    }
}
