//! Semicolon-delimited tabular sink, every field quoted

use crate::models::ProbeRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Quotes one field, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Incremental CSV writer for probe records
pub struct CsvSink {
    writer: BufWriter<File>,
}

impl CsvSink {
    /// Creates the output file and writes the header row
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(
            writer,
            "{};{};{}",
            quote("url"),
            quote("status"),
            quote("length")
        )?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Appends one row for an accepted result
    pub fn write_record(&mut self, record: &ProbeRecord) -> io::Result<()> {
        writeln!(
            self.writer,
            "{};{};{}",
            quote(&record.url),
            quote(&record.status.to_string()),
            quote(&record.length.to_string())
        )?;
        self.writer.flush()
    }
}
