//! Local timestamped board records written by the save control.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";
const LOCK_FILE_NAME: &str = ".records.lock";

/// One saved board: its name, the PNG raster as a data URL, and when it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub name: String,
    pub data: String,
    pub timestamp: String,
}

impl BoardRecord {
    /// Builds a record from PNG bytes, stamped with `saved_at` in ISO-8601 UTC.
    pub fn new(name: impl Into<String>, png: &[u8], saved_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            data: format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)),
            timestamp: saved_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Decodes the PNG bytes back out of the data URL.
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let Some(encoded) = self.data.strip_prefix(PNG_DATA_URL_PREFIX) else {
            bail!("record data is not a PNG data URL");
        };
        STANDARD
            .decode(encoded)
            .context("record data is not valid base64")
    }
}

/// Metadata of a stored record, as shown by `--list-saved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub key: String,
    pub name: String,
    pub timestamp: String,
    pub data_len: usize,
}

/// A directory of JSON records, one file per key.
#[derive(Debug, Clone)]
pub struct RecordStore {
    directory: PathBuf,
    key_prefix: String,
}

impl RecordStore {
    pub fn new(directory: impl Into<PathBuf>, key_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            key_prefix: key_prefix.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Writes `record` under `<prefix><unix millis>` and returns the key.
    ///
    /// If another record already owns that millisecond the key is bumped until free.
    pub fn save(&self, record: &BoardRecord, saved_at: DateTime<Utc>) -> Result<String> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "failed to create record directory {}",
                self.directory.display()
            )
        })?;

        let lock_path = self.directory.join(LOCK_FILE_NAME);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("failed to open record lock file {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| format!("failed to lock record store {}", lock_path.display()))?;

        let result = self.save_inner(record, saved_at.timestamp_millis());

        lock_file.unlock().unwrap_or_else(|err| {
            warn!(
                "failed to unlock record store {}: {}",
                lock_path.display(),
                err
            )
        });

        result
    }

    fn save_inner(&self, record: &BoardRecord, mut millis: i64) -> Result<String> {
        let mut key = self.key_for(millis);
        while self.record_path(&key).exists() {
            millis += 1;
            key = self.key_for(millis);
        }
        let path = self.record_path(&key);

        let json_bytes = serde_json::to_vec_pretty(record).context("failed to serialise record")?;

        let tmp_path = path.with_extension("json.tmp");
        {
            let mut tmp_file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)
                .with_context(|| {
                    format!("failed to open temporary record {}", tmp_path.display())
                })?;
            tmp_file
                .write_all(&json_bytes)
                .context("failed to write record payload")?;
            tmp_file
                .sync_all()
                .context("failed to sync temporary record")?;
        }

        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, Permissions::from_mode(0o600))
                .with_context(|| format!("failed to restrict {}", tmp_path.display()))?;
        }

        fs::rename(&tmp_path, &path).with_context(|| {
            format!(
                "failed to move temporary record {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        info!(
            "Board '{}' saved to {} ({} bytes)",
            record.name,
            path.display(),
            json_bytes.len()
        );
        Ok(key)
    }

    /// Reads a record back by key.
    pub fn load(&self, key: &str) -> Result<BoardRecord> {
        let path = self.record_path(key);
        let bytes =
            fs::read(&path).with_context(|| format!("failed to read record {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse record {}", path.display()))
    }

    /// Lists every record under this store's prefix, oldest key first.
    ///
    /// Unreadable files are skipped with a warning.
    pub fn list(&self) -> Result<Vec<RecordSummary>> {
        if !self.directory.exists() {
            debug!(
                "Record directory {} does not exist yet",
                self.directory.display()
            );
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.directory).with_context(|| {
            format!(
                "failed to read record directory {}",
                self.directory.display()
            )
        })?;

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !key.starts_with(&self.key_prefix) {
                continue;
            }
            match self.load(key) {
                Ok(record) => summaries.push(RecordSummary {
                    key: key.to_string(),
                    name: record.name,
                    timestamp: record.timestamp,
                    data_len: record.data.len(),
                }),
                Err(err) => warn!("Skipping unreadable record {}: {:#}", path.display(), err),
            }
        }

        summaries.sort_by(|a, b| self.key_millis(&a.key).cmp(&self.key_millis(&b.key)));
        Ok(summaries)
    }

    fn key_for(&self, millis: i64) -> String {
        format!("{}{}", self.key_prefix, millis)
    }

    fn key_millis(&self, key: &str) -> Option<i64> {
        key.strip_prefix(&self.key_prefix)?.parse().ok()
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn record_uses_png_data_url_and_millisecond_timestamp() {
        let record = BoardRecord::new("Sketch", b"\x89PNG", at(1_700_000_000_123));
        assert!(record.data.starts_with("data:image/png;base64,"));
        assert_eq!(record.timestamp, "2023-11-14T22:13:20.123Z");
        assert_eq!(record.png_bytes().unwrap(), b"\x89PNG");
    }

    #[test]
    fn record_serializes_with_expected_fields() {
        let record = BoardRecord::new("A", b"x", at(0));
        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("name"));
        assert!(object.contains_key("data"));
        assert!(object.contains_key("timestamp"));
    }

    #[test]
    fn save_writes_keyed_json_file() {
        let temp = tempfile::tempdir().unwrap();
        let store = RecordStore::new(temp.path().join("boards"), "whiteboard_");
        let record = BoardRecord::new("Board", b"png", at(42));

        let key = store.save(&record, at(42)).unwrap();
        assert_eq!(key, "whiteboard_42");
        assert!(temp.path().join("boards/whiteboard_42.json").exists());
        assert_eq!(store.load(&key).unwrap(), record);
    }

    #[test]
    fn colliding_keys_are_bumped() {
        let temp = tempfile::tempdir().unwrap();
        let store = RecordStore::new(temp.path(), "whiteboard_");
        let record = BoardRecord::new("Board", b"png", at(5));

        let first = store.save(&record, at(5)).unwrap();
        let second = store.save(&record, at(5)).unwrap();
        assert_eq!(first, "whiteboard_5");
        assert_eq!(second, "whiteboard_6");
    }

    #[test]
    fn list_returns_summaries_in_key_order() {
        let temp = tempfile::tempdir().unwrap();
        let store = RecordStore::new(temp.path(), "whiteboard_");
        store
            .save(&BoardRecord::new("Later", b"b", at(900)), at(900))
            .unwrap();
        store
            .save(&BoardRecord::new("Earlier", b"a", at(80)), at(80))
            .unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();
        fs::write(temp.path().join("whiteboard_7.json"), "{ broken").unwrap();

        let summaries = store.list().unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Earlier", "Later"]);
        assert_eq!(summaries[0].key, "whiteboard_80");
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let store = RecordStore::new(temp.path().join("nope"), "whiteboard_");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn png_bytes_rejects_foreign_data() {
        let record = BoardRecord {
            name: "x".into(),
            data: "data:image/jpeg;base64,AAAA".into(),
            timestamp: String::new(),
        };
        assert!(record.png_bytes().is_err());
    }
}
