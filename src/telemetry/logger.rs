//! JSONL telemetry writer with file rotation

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::TelemetryRecord;
use crate::error::Result;

/// Telemetry log writer
///
/// Appends one JSON object per line to numbered `sense-link-NNNNNN.jsonl`
/// files in the log directory. A file is closed after
/// `max_records_per_file` records and the next sequence number opened; only
/// the newest `max_files_to_keep` files are retained. Sequence numbering
/// continues across restarts.
#[derive(Debug)]
pub struct TelemetryLogger {
    log_dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    writer: Option<BufWriter<File>>,
    records_in_file: usize,
    file_seq: u64,
}

impl TelemetryLogger {
    /// Create a logger writing into `log_dir`, creating it if needed
    ///
    /// # Arguments
    ///
    /// * `log_dir` - Directory the JSONL files live in
    /// * `max_records_per_file` - Records written before rotating
    /// * `max_files_to_keep` - Newest files retained after rotation
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or scanned.
    pub fn new(
        log_dir: impl AsRef<Path>,
        max_records_per_file: usize,
        max_files_to_keep: usize,
    ) -> Result<Self> {
        let log_dir = log_dir.as_ref().to_path_buf();
        fs::create_dir_all(&log_dir)?;
        let file_seq = next_file_seq(&log_dir)?;

        Ok(Self {
            log_dir,
            max_records_per_file,
            max_files_to_keep,
            writer: None,
            records_in_file: 0,
            file_seq,
        })
    }

    /// Append one record, rotating first if the current file is full
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or file I/O failure.
    pub fn append(&mut self, record: &TelemetryRecord) -> Result<()> {
        if self.writer.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        if let Some(writer) = self.writer.as_mut() {
            serde_json::to_writer(&mut *writer, record)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            self.records_in_file += 1;
        }

        Ok(())
    }

    /// Close the current file and open the next sequence number
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        let path = self.log_dir.join(format!("sense-link-{:06}.jsonl", self.file_seq));
        debug!("Opening telemetry log file {}", path.display());

        let file = File::create(&path)?;
        self.writer = Some(BufWriter::new(file));
        self.records_in_file = 0;
        self.file_seq += 1;

        self.prune_old_files()
    }

    /// Remove the oldest files beyond the retention limit
    fn prune_old_files(&self) -> Result<()> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.log_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| parse_file_seq(path).is_some())
            .collect();
        files.sort();

        if files.len() > self.max_files_to_keep {
            let excess = files.len() - self.max_files_to_keep;
            for path in &files[..excess] {
                debug!("Removing old telemetry log {}", path.display());
                fs::remove_file(path)?;
            }
        }

        Ok(())
    }
}

/// Sequence number for the next log file in `log_dir`
fn next_file_seq(log_dir: &Path) -> Result<u64> {
    let mut max_seq: Option<u64> = None;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        if let Some(seq) = parse_file_seq(&entry.path()) {
            max_seq = Some(max_seq.map_or(seq, |m| m.max(seq)));
        }
    }

    Ok(max_seq.map_or(0, |m| m + 1))
}

/// Sequence number of a telemetry log file, or None for unrelated files
fn parse_file_seq(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    name.strip_prefix("sense-link-")?
        .strip_suffix(".jsonl")?
        .parse()
        .ok()
}
