//! # Record Sources
//!
//! Where raw records come from: in-memory text or files on disk.
//!
//! The loaders downstream take `&[Record]`, never paths, so tests feed
//! them literal text and production feeds them files through the same
//! seam.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use crate::record::{split_records, Record};

/// A supplier of raw records for one data file.
pub trait RecordSource {
    fn records(&self) -> IngestResult<Vec<Record>>;
}

// =============================================================================
// Text Source
// =============================================================================

/// Records parsed from an in-memory string.
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        TextSource { text: text.into() }
    }
}

impl RecordSource for TextSource {
    fn records(&self) -> IngestResult<Vec<Record>> {
        Ok(split_records(&self.text))
    }
}

// =============================================================================
// File Source
// =============================================================================

/// Records read from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn records(&self) -> IngestResult<Vec<Record>> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| IngestError::source(&self.path, source))?;
        let records = split_records(&text);
        debug!(path = %self.path.display(), count = records.len(), "Read records");
        Ok(records)
    }
}

// =============================================================================
// Record Batches
// =============================================================================

/// The five record sets one ingest run needs, loaded up front.
///
/// Bulk preloading keeps the join pass free of per-record file reads;
/// assembly works entirely against these in-memory batches.
#[derive(Debug, Clone)]
pub struct RecordBatches {
    pub items: Vec<Record>,
    pub persons: Vec<Record>,
    pub stores: Vec<Record>,
    pub sales: Vec<Record>,
    pub sale_lines: Vec<Record>,
}

impl RecordBatches {
    /// Reads all five files named by the configuration.
    pub fn load(config: &IngestConfig) -> IngestResult<Self> {
        Ok(RecordBatches {
            items: FileSource::new(&config.items_path).records()?,
            persons: FileSource::new(&config.persons_path).records()?,
            stores: FileSource::new(&config.stores_path).records()?,
            sales: FileSource::new(&config.sales_path).records()?,
            sale_lines: FileSource::new(&config.sale_lines_path).records()?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source() {
        let source = TextSource::new("header\nc001,P,Widget,10.00");
        let records = source.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].fields[0], "c001");
    }

    #[test]
    fn test_file_source_reads_from_disk() {
        let path = std::env::temp_dir().join("till_source_reads_from_disk.csv");
        fs::write(&path, "header\nc001,P,Widget,10.00\n").unwrap();

        let records = FileSource::new(&path).records().unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].line, 2);
        assert_eq!(records[1].fields[3], "10.00");
    }

    #[test]
    fn test_file_source_missing_file_reports_path() {
        let source = FileSource::new("/no/such/dir/Items.csv");
        let err = source.records().unwrap_err();
        assert!(matches!(err, IngestError::Source { .. }));
        assert!(err.to_string().contains("/no/such/dir/Items.csv"));
    }
}
