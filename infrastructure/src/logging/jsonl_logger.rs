//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying `type`, `seq`
//! and `timestamp` next to the event payload. Lines are appended, so one file
//! can collect several sessions.

use snapstudy_application::{ConversationEvent, ConversationLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct LogState {
    writer: BufWriter<File>,
    seq: u64,
}

/// Conversation logger writing one JSON object per line.
pub struct JsonlConversationLogger {
    state: Mutex<LogState>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// Returns `None` (after a warning) when the file cannot be opened; a
    /// missing conversation log never stops a query.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open conversation log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            state: Mutex::new(LogState {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: ConversationEvent, seq: u64) -> serde_json::Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    match event.payload {
        serde_json::Value::Object(mut map) => {
            map.insert("type".to_string(), event.event_type.into());
            map.insert("seq".to_string(), seq.into());
            map.insert("timestamp".to_string(), timestamp.into());
            serde_json::Value::Object(map)
        }
        other => serde_json::json!({
            "type": event.event_type,
            "seq": seq,
            "timestamp": timestamp,
            "data": other,
        }),
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.seq += 1;
        let seq = state.seq;

        let Ok(line) = serde_json::to_string(&record(event, seq)) else {
            return;
        };
        if let Err(e) = writeln!(state.writer, "{}", line).and_then(|_| state.writer.flush()) {
            warn!("Conversation log write failed: {}", e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapstudy_domain::{ProviderId, ProviderResult};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_events_are_written_as_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("conversation.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::question("What is it about?", Some(4200)));
        logger.log(ConversationEvent::fan_out(&[
            ProviderResult::success(ProviderId::Groq, "answer"),
            ProviderResult::failure(ProviderId::Gemini, "HTTP 500"),
        ]));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "question");
        assert_eq!(lines[0]["context_chars"], 4200);
        assert_eq!(lines[0]["seq"], 1);
        assert_eq!(lines[1]["type"], "fan_out_complete");
        assert_eq!(lines[1]["providers"][1]["error"], "HTTP 500");
        assert!(lines[1]["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversation.jsonl");

        let first = JsonlConversationLogger::open(&path).unwrap();
        first.log(ConversationEvent::error("first run"));
        drop(first);

        let second = JsonlConversationLogger::open(&path).unwrap();
        second.log(ConversationEvent::error("second run"));
        drop(second);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["message"], "second run");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversation.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new("note", serde_json::json!("plain")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "plain");
    }

    #[test]
    fn test_directory_path_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlConversationLogger::open(dir.path()).is_none());
    }
}
