//! # Record Module
//!
//! Comma-split data records tagged with source line numbers.
//!
//! The data files use a bare comma-delimited layout: no quoting, no
//! escaping, so a comma always separates fields and a field can never
//! contain one. Fields keep their raw text, whitespace included; it is
//! the loaders' job to decide what each position means.

use crate::error::{IngestError, IngestResult};

/// One data line, split on commas, tagged with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Raw field texts in file order. Empty fields are preserved.
    pub fields: Vec<String>,
    /// 1-based line number in the source file, header row included,
    /// so error messages match what an editor shows.
    pub line: usize,
}

impl Record {
    pub fn new(fields: Vec<String>, line: usize) -> Self {
        Record { fields, line }
    }

    /// Number of fields on this line.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks the record carries at least `count` fields.
    pub fn require(&self, count: usize) -> IngestResult<()> {
        if self.fields.len() < count {
            return Err(IngestError::too_few_fields(
                self.line,
                count,
                self.fields.len(),
            ));
        }
        Ok(())
    }
}

/// Splits raw file text into records, one per line.
///
/// Every line is split, the header row included; the loaders skip it.
/// `str::lines` handles both `\n` and `\r\n` endings.
pub fn split_records(text: &str) -> Vec<Record> {
    text.lines()
        .enumerate()
        .map(|(index, line)| Record::new(line.split(',').map(str::to_string).collect(), index + 1))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
