//! Wheel integrity record (`RECORD`).
//!
//! One line per archived file: path, content digest, byte length. The
//! record's own line carries empty digest and length fields by
//! convention, so installers can verify everything else.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// One `RECORD` line.
#[derive(Debug, Clone)]
pub struct RecordEntry {
    pub path: String,
    pub digest: String,
    pub size: u64,
}

/// Accumulates entries and renders the record file.
#[derive(Debug, Default)]
pub struct Record {
    entries: Vec<RecordEntry>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file's contents under its archive path.
    pub fn push(&mut self, path: &str, contents: &[u8]) {
        self.entries.push(RecordEntry {
            path: path.to_string(),
            digest: digest(contents),
            size: contents.len() as u64,
        });
    }

    /// Render the record, sorted by path, ending with the
    /// self-referential line for `record_path`.
    #[must_use]
    pub fn render(&self, record_path: &str) -> String {
        let mut entries: Vec<&RecordEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        let mut out = String::new();
        for entry in entries {
            out.push_str(&entry.path);
            out.push(',');
            out.push_str(&entry.digest);
            out.push(',');
            out.push_str(&entry.size.to_string());
            out.push('\n');
        }
        out.push_str(record_path);
        out.push_str(",,\n");
        out
    }
}

/// `sha256=<urlsafe base64, no padding>` digest of `data`.
#[must_use]
pub fn digest(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("sha256={}", URL_SAFE_NO_PAD.encode(hash))
}
