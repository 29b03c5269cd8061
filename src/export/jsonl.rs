//! JSONL dataset writer and reader.
//!
//! Each record is written as one compact JSON object per line. Non-ASCII text
//! is written as UTF-8, never `\u` escaped.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExportError;
use crate::socratic::Conversation;

/// Result of writing a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of records written.
    pub records: usize,
    /// File size in bytes.
    pub bytes: u64,
}

impl WriteSummary {
    /// File size in kilobytes (1 KB = 1024 bytes).
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Writes conversations to a JSONL file, replacing any previous contents.
#[derive(Debug, Clone)]
pub struct JsonlWriter {
    path: PathBuf,
}

impl JsonlWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes all records, one per line.
    ///
    /// Creates the parent directory if needed and truncates an existing
    /// file. The handle is closed when this returns, on success or error.
    pub fn write(&self, records: &[Conversation]) -> Result<WriteSummary, ExportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExportError::filesystem(parent, e))?;
        }

        let file = File::create(&self.path).map_err(|e| ExportError::filesystem(&self.path, e))?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let line = serde_json::to_string(record)?;
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        drop(writer);

        let bytes = fs::metadata(&self.path)
            .map_err(|e| ExportError::filesystem(&self.path, e))?
            .len();

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            bytes,
            "Wrote dataset"
        );

        Ok(WriteSummary {
            path: self.path.clone(),
            records: records.len(),
            bytes,
        })
    }
}

/// Reads a JSONL dataset back into records. Blank lines are skipped.
pub fn read_jsonl(path: impl AsRef<Path>) -> Result<Vec<Conversation>, ExportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ExportError::filesystem(path, e))?;

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| ExportError::InvalidRecord {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}
