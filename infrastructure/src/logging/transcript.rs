//! JSONL transcript writer.
//!
//! Each [`TranscriptEvent`] becomes one JSON line carrying a `type` and a
//! `timestamp`. The file is opened in append mode so several runs can share
//! one transcript.

use council_application::ports::transcript::{TranscriptEvent, TranscriptLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger appending one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; every record is flushed as it
/// is written.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: TranscriptEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert(
            "type".to_string(),
            Value::String(event.event_type.to_string()),
        );
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(map)
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let line = match serde_json::to_string(&Self::record(event)) {
            Ok(line) => line,
            Err(e) => {
                warn!("Skipping transcript record: {}", e);
                return;
            }
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write transcript {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();

        logger.log(TranscriptEvent::new(
            "question",
            json!({ "mode": "vote", "question": "What is Rust?" }),
        ));
        logger.log(TranscriptEvent::new(
            "provider_reply",
            json!({ "provider": "Groq", "response": "A language." }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "question");
        assert_eq!(records[0]["question"], "What is Rust?");
        assert_eq!(records[1]["provider"], "Groq");
        assert!(records.iter().all(|r| r.get("timestamp").is_some()));
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlTranscriptLogger::open(&path).unwrap();

        logger.log(TranscriptEvent::new("note", json!("plain text")));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "plain text");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shared.jsonl");

        for run in 0..2 {
            let logger = JsonlTranscriptLogger::open(&path).unwrap();
            logger.log(TranscriptEvent::new("run", json!({ "run": run })));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["run"], 1);
    }
}
