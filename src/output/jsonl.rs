//! Record-per-line structured sink — one JSON object per write

use crate::models::ProbeRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Incremental JSONL writer; no surrounding array wrapper, each line is
/// an independently parseable record
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn write_record(&mut self, record: &ProbeRecord) -> io::Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}
