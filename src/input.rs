//! Streaming reader for the URL input file.
//!
//! Comma-separated, no header row; the first column of each row is the base
//! URL and any further columns are ignored. Rows are yielded one at a time
//! so arbitrarily long inputs never sit in memory. Blank lines count as rows
//! and come back as `MalformedRow`.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{ScrapeError, ScrapeResult};

/// Byte-order mark some spreadsheet exports put in front of the first cell
const UTF8_BOM: char = '\u{feff}';

/// One input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// 1-based position of the row in the input
    pub ordinal: usize,
    /// Base URL from the first column
    pub url: String,
}

/// Ordered source of input rows
pub struct UrlSource<R: Read> {
    reader: csv::Reader<BlankLineMarker<R>>,
    ordinal: usize,
}

impl UrlSource<File> {
    /// Open the input file at `path`
    pub fn open(path: impl AsRef<Path>) -> ScrapeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScrapeError::io(path, e))?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> UrlSource<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BlankLineMarker::new(reader));

        Self { reader, ordinal: 0 }
    }
}

impl<R: Read> Iterator for UrlSource<R> {
    type Item = ScrapeResult<InputRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(false) => None,
            Ok(true) => {
                self.ordinal += 1;
                Some(parse_row(self.ordinal, &record))
            }
            Err(e) => {
                self.ordinal += 1;
                Some(Err(e.into()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    LineStart,
    FieldStart,
    Unquoted,
    Quoted,
    /// Saw `"` inside a quoted field: closing quote or first half of `""`
    QuoteEnd,
}

/// Rewrites every blank line outside quoted fields to `""`.
///
/// The csv reader drops blank lines without reporting them. With the
/// rewrite each one arrives as a record with a single empty field, so it
/// is counted and reported like any other row without a URL. No newlines
/// are added or removed, so line numbers stay those of the file.
struct BlankLineMarker<R> {
    inner: R,
    state: Scan,
    after_cr: bool,
    chunk: Vec<u8>,
    out: Vec<u8>,
    served: usize,
}

impl<R: Read> BlankLineMarker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            state: Scan::LineStart,
            after_cr: false,
            chunk: vec![0; 8 * 1024],
            out: Vec::new(),
            served: 0,
        }
    }

    fn push(&mut self, byte: u8) {
        match self.state {
            Scan::Quoted => {
                if byte == b'"' {
                    self.state = Scan::QuoteEnd;
                }
                self.after_cr = false;
                self.out.push(byte);
            }
            Scan::QuoteEnd if byte == b'"' => {
                self.state = Scan::Quoted;
                self.out.push(byte);
            }
            _ => self.push_unquoted(byte),
        }
    }

    fn push_unquoted(&mut self, byte: u8) {
        match byte {
            // Second half of CRLF; the line was already handled at the CR
            b'\n' if self.after_cr => {
                self.after_cr = false;
            }
            b'\r' | b'\n' => {
                if self.state == Scan::LineStart {
                    self.out.extend_from_slice(b"\"\"");
                }
                self.after_cr = byte == b'\r';
                self.state = Scan::LineStart;
            }
            b'"' if matches!(self.state, Scan::LineStart | Scan::FieldStart) => {
                self.after_cr = false;
                self.state = Scan::Quoted;
            }
            b',' => {
                self.after_cr = false;
                self.state = Scan::FieldStart;
            }
            _ => {
                self.after_cr = false;
                self.state = Scan::Unquoted;
            }
        }
        self.out.push(byte);
    }
}

impl<R: Read> Read for BlankLineMarker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.served == self.out.len() {
            self.out.clear();
            self.served = 0;
            let n = self.inner.read(&mut self.chunk)?;
            if n == 0 {
                return Ok(0);
            }
            let chunk = std::mem::take(&mut self.chunk);
            for &byte in &chunk[..n] {
                self.push(byte);
            }
            self.chunk = chunk;
        }

        let pending = &self.out[self.served..];
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.served += n;
        Ok(n)
    }
}

fn parse_row(ordinal: usize, record: &csv::StringRecord) -> ScrapeResult<InputRow> {
    let first = record.get(0).unwrap_or_default();
    let url = if ordinal == 1 {
        first.trim_start_matches(UTF8_BOM)
    } else {
        first
    };

    if url.trim().is_empty() {
        let line = record.position().map_or(0, csv::Position::line);
        return Err(ScrapeError::MalformedRow { ordinal, line });
    }

    Ok(InputRow {
        ordinal,
        url: url.to_string(),
    })
}
