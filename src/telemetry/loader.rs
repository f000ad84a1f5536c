use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

use super::normalizer::{normalize, Normalized};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("log file not found: {0}")]
    NotFound(String),
    #[error("log file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode log file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("log file does not contain a JSON array of entries")]
    NotAnArray,
}

/// Reads a recorded JSON log and normalizes it into per-entity series.
pub fn load(path: &Path) -> Result<Normalized, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
        _ => LoadError::Io(e),
    })?;

    match serde_json::from_str(&content)? {
        Value::Array(entries) => {
            log::info!("Processing {} entries from {}", entries.len(), path.display());
            Ok(normalize(&entries))
        }
        _ => Err(LoadError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn log_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_normalizes() {
        let file = log_file(
            r#"[
                {"timestamp": "t2", "type": "REQ", "data": {"takim_numarasi": 5, "iha_enlem": 1.0}},
                {"timestamp": "t1", "type": "REQ", "data": {"takim_numarasi": 5, "iha_enlem": 2.0}},
                {"timestamp": "t3", "type": "RESP", "data": {"konumBilgileri": [{"takim_numarasi": 7, "iha_enlem": 3.0}]}}
            ]"#,
        );

        let normalized = load(file.path()).unwrap();
        assert_eq!(normalized.store.ids(), vec![5, 7]);
        assert_eq!(normalized.report.entries, 3);
        assert_eq!(normalized.report.samples, 3);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("cleaned_data.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let file = log_file("[{\"timestamp\": ");
        assert!(matches!(load(file.path()), Err(LoadError::Json(_))));
    }

    #[test]
    fn top_level_must_be_an_array() {
        let file = log_file(r#"{"timestamp": "t1"}"#);
        assert!(matches!(load(file.path()), Err(LoadError::NotAnArray)));
    }

    #[test]
    fn empty_array_loads_empty_store() {
        let file = log_file("[]");
        let normalized = load(file.path()).unwrap();
        assert!(normalized.store.is_empty());
    }
}
