use crate::error::StoreError;
use core_types::Document;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;
use tempfile::NamedTempFile;

/// Stateless accessor for the JSON documents on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateStore;

impl StateStore {
    pub fn new() -> Self {
        Self
    }

    /// Reads a JSON object, returning an empty document on any failure.
    ///
    /// Missing files are expected (first run) and only logged at debug level.
    pub fn read(&self, path: &Path) -> Document {
        match self.try_read(path) {
            Ok(doc) => doc,
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(path = %path.display(), "Document not found, treating as empty.");
                Document::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable document, treating as empty.");
                Document::new()
            }
        }
    }

    /// Reads a JSON object, reporting why the read failed.
    pub fn try_read(&self, path: &Path) -> Result<Document, StoreError> {
        let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(StoreError::Empty(path.to_path_buf()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(doc) => Ok(doc),
            _ => Err(StoreError::NotAnObject(path.to_path_buf())),
        }
    }

    /// Atomically replaces the file at `path` with the JSON form of `value`.
    ///
    /// The document is written to a temp file in the same directory, synced,
    /// and renamed over the destination. On failure the error is logged, the
    /// temp file is removed and the previous content stays untouched.
    pub fn write<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let result = Self::write_atomic(path, value);
        if let Err(e) = &result {
            tracing::error!(error = %e, path = %path.display(), "Failed to write document.");
        }
        result
    }

    fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
        let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        bytes.push(b'\n');

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(&bytes).map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file().sync_all().map_err(|e| StoreError::io(tmp.path(), e))?;

        // Temp files are created 0600; the metrics file is read by another process.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(|e| StoreError::io(tmp.path(), e))?;
        }

        tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
        Ok(())
    }

    /// Last modification time, or `None` when the file does not exist or the
    /// platform cannot report it.
    pub fn modified(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::DerivedMetrics;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        let store = StateStore::new();
        assert!(store.read(&path).is_empty());
        assert!(matches!(store.try_read(&path), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_degenerate_content_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new();
        let cases = [
            ("empty.json", ""),
            ("blank.json", "  \n"),
            ("truncated.json", "{\n  \"equity\": 1000"),
            ("array.json", "[1, 2, 3]"),
            ("garbage.json", "not json at all"),
        ];
        for (name, content) in cases {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            assert!(store.read(&path).is_empty(), "{name} should read as empty");
        }
    }

    #[test]
    fn test_reads_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        fs::write(&path, r#"{ "equity": 100500.25, "cash": 100.0 }"#).unwrap();
        let doc = StateStore::new().read(&path);
        assert_eq!(doc.get("equity"), Some(&json!(100500.25)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_metrics_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        let store = StateStore::new();
        let metrics = DerivedMetrics {
            high_water_mark: dec!(123456.78),
            max_drawdown: dec!(-12.34567891),
        };

        store.write(&path, &metrics).unwrap();
        let back = DerivedMetrics::from_document(&store.read(&path)).unwrap();
        assert_eq!(back, metrics);
    }

    #[test]
    fn test_write_replaces_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        let store = StateStore::new();

        store.write(&path, &json!({ "a": 1 })).unwrap();
        store.write(&path, &json!({ "a": 2 })).unwrap();

        assert_eq!(store.read(&path).get("a"), Some(&json!(2)));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    /// A value serde_json refuses to encode.
    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_failed_write_keeps_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        let store = StateStore::new();
        store.write(&path, &json!({ "a": 1 })).unwrap();
        let before = fs::read(&path).unwrap();

        let result = store.write(&path, &Unencodable);
        assert!(matches!(result, Err(StoreError::Serialize { .. })));

        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(store.read(&path).get("a"), Some(&json!(1)));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_rename_keeps_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new();
        // A non-empty directory at the destination makes the final rename fail.
        let path = dir.path().join("metrics.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "old").unwrap();

        assert!(store.write(&path, &json!({ "a": 2 })).is_err());

        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "old");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        let store = StateStore::new();
        assert_eq!(store.modified(&path), None);
        fs::write(&path, "{}").unwrap();
        assert!(store.modified(&path).is_some());
    }
}
