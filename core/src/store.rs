//! Record and feedback persistence.
//!
//! RULE: Only store.rs touches the filesystem.
//! Analytics modules receive in-memory slices — they never open files.
//!
//! Both stores speak newline-delimited JSON, UTF-8, one record per line.

use crate::error::MetricsResult;
use crate::feedback::FeedbackRecord;
use crate::record::CallRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Line-delimited source of call records.
pub struct CallStore;

impl CallStore {
    /// Load every valid record from a newline-delimited JSON file.
    ///
    /// Skip policy, applied per line so one bad record never aborts the
    /// load:
    ///   - a line that fails structural parsing is dropped and logged
    ///   - a parsed record without a string `call_id` is dropped and logged
    /// No other field is validated here.
    pub fn load(path: impl AsRef<Path>) -> MetricsResult<Vec<CallRecord>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let calls = Self::load_from(BufReader::new(file))?;
        log::info!("loaded {} call records from {}", calls.len(), path.display());
        Ok(calls)
    }

    /// Load from any buffered reader. Backs [`CallStore::load`]; used
    /// directly in tests.
    pub fn load_from(reader: impl BufRead) -> MetricsResult<Vec<CallRecord>> {
        let mut calls = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let value: serde_json::Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(err) => {
                    log::warn!("line {}: unparseable record, skipped: {err}", line_no + 1);
                    continue;
                }
            };
            if value.get("call_id").and_then(|id| id.as_str()).is_none() {
                log::warn!("line {}: record without call_id, dropped", line_no + 1);
                continue;
            }
            match serde_json::from_value::<CallRecord>(value) {
                Ok(call) => calls.push(call),
                Err(err) => {
                    log::warn!("line {}: invalid record shape, skipped: {err}", line_no + 1);
                }
            }
        }
        Ok(calls)
    }

    /// Write records as one JSON object per line (generator output).
    pub fn save(path: impl AsRef<Path>, calls: &[CallRecord]) -> MetricsResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(path)?);
        for call in calls {
            serde_json::to_writer(&mut writer, call)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Append-only feedback history.
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one record as a JSON line, creating the file (and parent
    /// directory) on first write. Records are never updated or deleted.
    pub fn append(&self, record: &FeedbackRecord) -> MetricsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Read the full accumulated history. A missing file is an empty
    /// history, not an error. Malformed lines are skipped and logged.
    pub fn load(&self) -> MetricsResult<Vec<FeedbackRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<FeedbackRecord>(&line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    log::warn!("line {}: malformed feedback, skipped: {err}", line_no + 1);
                }
            }
        }
        Ok(records)
    }
}
