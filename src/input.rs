//! Loading dashboard input from files or stdin.

use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::dashboard::DashboardInput;

/// Path value that selects stdin.
pub const STDIN: &str = "-";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dashboard input: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode input JSON. Blank text, or JSON that is not an object, is treated
/// as an empty dashboard; only unparseable text is an error.
pub fn parse(text: &str) -> Result<DashboardInput, InputError> {
    if text.trim().is_empty() {
        return Ok(DashboardInput::default());
    }
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        warn!("dashboard input is not a JSON object, rendering an empty dashboard");
        return Ok(DashboardInput::default());
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and decode input from `path`, or from stdin when `path` is `-`.
pub fn load(path: &str) -> Result<DashboardInput, InputError> {
    let text = if path == STDIN {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| InputError::Read {
                path: "stdin".to_string(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(Path::new(path)).map_err(|source| InputError::Read {
            path: path.to_string(),
            source,
        })?
    };
    debug!(path, bytes = text.len(), "read dashboard input");
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_blank_input_is_empty_dashboard() {
        assert_eq!(parse("").unwrap(), DashboardInput::default());
        assert_eq!(parse("  \n").unwrap(), DashboardInput::default());
        assert_eq!(parse("{}").unwrap(), DashboardInput::default());
    }

    #[test]
    fn test_non_object_input_is_empty_dashboard() {
        assert_eq!(parse("[1, 2]").unwrap(), DashboardInput::default());
        assert_eq!(parse("null").unwrap(), DashboardInput::default());
        assert_eq!(parse("\"text\"").unwrap(), DashboardInput::default());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, InputError::Decode(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"anomalies": [{{"name": "a", "anomaly_type": "click_drop"}}]}}"#
        )
        .unwrap();
        let input = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(input.anomalies.len(), 1);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
