//! Append-only CSV output.
//!
//! The file is created fresh with a UTF-8 byte-order mark and the fixed
//! header. Every record is flushed as soon as it is appended so a crash
//! mid-run keeps all rows written so far.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};
use crate::record::{HEADER, Record};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Destination for scraped records
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) the output file and write the header
    pub fn create(path: impl AsRef<Path>) -> ScrapeResult<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| ScrapeError::io(&path, e))?;
        let sink = Self::from_writer(file)?;
        debug!("Created output file {}", path.display());
        Ok(sink)
    }
}

impl<W: Write> CsvSink<W> {
    /// Start a sink on any writer: BOM, then header
    pub fn from_writer(mut inner: W) -> ScrapeResult<Self> {
        inner
            .write_all(UTF8_BOM)
            .map_err(|e| ScrapeError::Other(format!("Failed to write byte-order mark: {e}")))?;

        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(inner);

        let mut sink = Self {
            writer,
            rows_written: 0,
        };
        sink.write_fields(&HEADER)?;
        Ok(sink)
    }

    /// Append one record and flush it
    pub fn append(&mut self, record: &Record) -> ScrapeResult<()> {
        self.write_fields(&record.csv_fields())?;
        self.rows_written += 1;
        Ok(())
    }

    /// Data rows written so far (header excluded)
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> ScrapeResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| ScrapeError::Other(format!("Failed to flush output: {}", e.error())))
    }

    fn write_fields(&mut self, fields: &[&str]) -> ScrapeResult<()> {
        self.writer.write_record(fields)?;
        self.writer
            .flush()
            .map_err(|e| ScrapeError::Other(format!("Failed to flush output: {e}")))
    }
}
