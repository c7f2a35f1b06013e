//! Provides the append-only error report document and its sink.
//!
//! Every failed generation or analysis attempt becomes one structured entry
//! in a single JSON document: a pretty-printed array of records, ordered by
//! append time, never mutated or deleted. The sink performs a locked
//! read-modify-write so a concurrent reader (the browser UI tailing the
//! report) always sees a complete document.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while appending to or reading the report document.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The underlying storage was unreadable or unwritable.
    #[error("report io error: {0}")]
    Io(#[from] std::io::Error),
    /// The existing document is malformed. The append aborts and the file is
    /// left untouched; prior entries are never silently discarded.
    #[error("report document is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    /// The new entry could not be serialized.
    #[error("report serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// One record of a failed generation or analysis attempt.
///
/// # Examples
/// ```
/// use turntable::report::ErrorReportEntry;
///
/// let entry = ErrorReportEntry {
///     engine_version: "2026".into(),
///     batch_mode: false,
///     user: "artist".into(),
///     model: "/assets/hero.fbx".into(),
///     output: "/thumbs/__assets__hero.fbx.png".into(),
///     error: "no geometry found".into(),
///     trace: "no geometry found".into(),
///     created_at: ErrorReportEntry::utc_timestamp(),
/// };
/// assert!(entry.created_at.ends_with('Z'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReportEntry {
    /// Host application version at the time of failure.
    pub engine_version: String,
    /// Whether the host was running headless.
    pub batch_mode: bool,
    /// Operating-system identity of the user.
    pub user: String,
    /// Source model path the attempt was for.
    pub model: String,
    /// Output artifact path the attempt targeted.
    pub output: String,
    /// Short error message.
    pub error: String,
    /// Full error chain, one cause per line.
    pub trace: String,
    /// UTC creation timestamp, RFC 3339 with trailing `Z`.
    pub created_at: String,
}

impl ErrorReportEntry {
    /// Returns the current UTC time formatted for `created_at`.
    pub fn utc_timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Appends entries to (and reads back) a report document on disk.
///
/// # Examples
/// ```no_run
/// use turntable::report::ReportSink;
///
/// let sink = ReportSink::new("thumbnail_errors.json");
/// let entries = sink.read_all().unwrap();
/// println!("{} recorded failures", entries.len());
/// ```
#[derive(Debug, Clone)]
pub struct ReportSink {
    path: PathBuf,
}

impl ReportSink {
    /// Creates a sink targeting the given document path. The document itself
    /// is created lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry: creates the document if missing, reads the full
    /// existing sequence, appends, and rewrites the document pretty-printed.
    /// The whole read-modify-write runs under an exclusive advisory lock.
    ///
    /// # Errors
    /// Fails with [`ReportError::Corrupt`] if the existing document is
    /// malformed (nothing is written in that case), or with
    /// [`ReportError::Io`] if storage is unavailable.
    pub fn append(&self, entry: ErrorReportEntry) -> Result<(), ReportError> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;
        file.lock_exclusive()?;
        let result = append_locked(&mut file, entry);
        let _ = FileExt::unlock(&file);
        result
    }

    /// Reads every entry in the document, in append order. A missing or empty
    /// document reads as an empty sequence.
    ///
    /// # Errors
    /// Fails if the document exists but is unreadable or malformed.
    pub fn read_all(&self) -> Result<Vec<ErrorReportEntry>, ReportError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(ReportError::Corrupt)
    }
}

fn append_locked(file: &mut File, entry: ErrorReportEntry) -> Result<(), ReportError> {
    let mut text = String::new();
    file.read_to_string(&mut text)?;

    // A freshly created (or fully empty) document is an empty sequence.
    let mut entries: Vec<ErrorReportEntry> = if text.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&text).map_err(ReportError::Corrupt)?
    };

    entries.push(entry);

    let body = serde_json::to_string_pretty(&entries).map_err(ReportError::Serialize)?;
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(body.as_bytes())?;
    Ok(())
}
