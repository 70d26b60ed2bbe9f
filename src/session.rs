use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A saved editing session.
///
/// On disk this is pretty-printed JSON:
/// `{"x_signal": [...], "h_signal": [...], "length": 7}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    pub x_signal: Vec<f64>,
    pub h_signal: Vec<f64>,
    /// Editor signal length. Older files may omit it; it then defaults to
    /// the length of `x_signal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl SessionFile {
    pub fn new(x_signal: Vec<f64>, h_signal: Vec<f64>, length: usize) -> Self {
        Self {
            x_signal,
            h_signal,
            length: Some(length),
        }
    }

    /// Configured signal length, falling back to the length of `x_signal`.
    pub fn length(&self) -> usize {
        self.length.unwrap_or(self.x_signal.len())
    }
}

pub fn save_session<P: AsRef<Path>>(session: &SessionFile, path: P) -> Result<()> {
    let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write session file: {:?}", path.as_ref()))?;
    Ok(())
}

pub fn load_session<P: AsRef<Path>>(path: P) -> Result<SessionFile> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to open session file: {:?}", path.as_ref()))?;
    parse_session(&content)
        .with_context(|| format!("Invalid session file: {:?}", path.as_ref()))
}

/// Decode session JSON. Both signals must be present and non-empty.
pub fn parse_session(content: &str) -> Result<SessionFile> {
    let session: SessionFile =
        serde_json::from_str(content).context("Failed to parse session JSON")?;

    if session.x_signal.is_empty() {
        anyhow::bail!("x_signal is empty");
    }
    if session.h_signal.is_empty() {
        anyhow::bail!("h_signal is empty");
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_file_roundtrip() {
        let session = SessionFile::new(
            vec![1.0, 2.0, 1.0, 0.0, 0.0],
            vec![0.5, 0.3, 0.2, 0.0, 0.0],
            5,
        );

        let temp_path = std::env::temp_dir().join("convolution_viewer_session_roundtrip.json");
        save_session(&session, &temp_path).expect("Save should succeed");

        let loaded = load_session(&temp_path).expect("Load should succeed");
        assert_eq!(loaded, session);
        assert_eq!(loaded.length(), 5);

        std::fs::remove_file(&temp_path).ok();
    }

    #[test]
    fn test_saved_json_uses_expected_keys() {
        let session = SessionFile::new(vec![1.0], vec![2.0], 3);
        let json = serde_json::to_string_pretty(&session).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["x_signal"], serde_json::json!([1.0]));
        assert_eq!(value["h_signal"], serde_json::json!([2.0]));
        assert_eq!(value["length"], serde_json::json!(3));
    }

    #[test]
    fn test_missing_length_defaults_to_x_length() {
        let session = parse_session(r#"{"x_signal": [1, 2, 3, 4], "h_signal": [1]}"#).unwrap();
        assert_eq!(session.length, None);
        assert_eq!(session.length(), 4);
    }

    #[test]
    fn test_rejects_empty_or_malformed_sessions() {
        assert!(parse_session(r#"{"x_signal": [], "h_signal": [1]}"#).is_err());
        assert!(parse_session(r#"{"x_signal": [1], "h_signal": []}"#).is_err());
        assert!(parse_session(r#"{"x_signal": [1, "a"], "h_signal": [1]}"#).is_err());
        assert!(parse_session("not json").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_session("/nonexistent/dir/session.json").unwrap_err();
        assert!(format!("{}", err).contains("session.json"));
    }
}
