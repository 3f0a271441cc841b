//! FASTA streaming parser
//!
//! # Format
//!
//! ```text
//! >contig1 description
//! GATTACAGATTACA
//! TGCATGCA
//! >contig2
//! ACGTACGT
//! ```
//!
//! Sequence lines are concatenated without their line breaks. Letter case is
//! kept as-is: the channel encoding preserves it and every other encoding
//! is case-insensitive.

use crate::error::{Result, SensorError};
use crate::io::compression::{CompressedReader, DataSource};
use crate::types::FastaRecord;
use std::io::BufRead;
use std::path::Path;

/// FASTA streaming parser, one record in memory at a time
///
/// # Example
///
/// ```no_run
/// use contig_sensors::FastaStream;
///
/// let stream = FastaStream::from_path("genome.fna.gz")?;
/// for record in stream {
///     let record = record?;
///     println!("{}: {} bp", record.id, record.sequence.len());
/// }
/// # Ok::<(), contig_sensors::error::SensorError>(())
/// ```
pub struct FastaStream<R: BufRead> {
    reader: R,
    line_buffer: Vec<u8>,
    line_number: usize,
    /// Header of the next record, already consumed from the reader
    pending_header: Option<String>,
    finished: bool,
}

impl FastaStream<CompressedReader> {
    /// Create a FASTA stream from a data source (plain or gzip)
    pub fn new(source: DataSource) -> Result<Self> {
        let compressed_reader = CompressedReader::new(source)?;
        Ok(Self::from_reader(compressed_reader))
    }

    /// Create a FASTA stream from a local file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSource::from_path(path))
    }
}

impl<R: BufRead> FastaStream<R> {
    /// Create a FASTA stream from any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line_buffer: Vec::with_capacity(256),
            line_number: 0,
            pending_header: None,
            finished: false,
        }
    }

    /// Read the next line into the line buffer, trimmed of its line ending.
    /// Returns false at EOF.
    fn next_line(&mut self) -> Result<bool> {
        self.line_buffer.clear();
        let n = self.reader.read_until(b'\n', &mut self.line_buffer)?;
        if n == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        while matches!(self.line_buffer.last(), Some(b'\n' | b'\r')) {
            self.line_buffer.pop();
        }
        Ok(true)
    }

    fn read_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.finished {
            return Ok(None);
        }

        let header = match self.pending_header.take() {
            Some(header) => header,
            None => loop {
                if !self.next_line()? {
                    self.finished = true;
                    return Ok(None);
                }
                let line = self.line_buffer.trim_ascii();
                if line.is_empty() {
                    continue;
                }
                if line[0] != b'>' {
                    return Err(SensorError::InvalidFastaFormat {
                        line: self.line_number,
                        msg: format!(
                            "Expected '>' at start of header, got: {}",
                            String::from_utf8_lossy(line)
                        ),
                    });
                }
                break String::from_utf8_lossy(line).into_owned();
            },
        };

        // ID runs from after '>' to the first whitespace
        let id = header[1..]
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        if id.is_empty() {
            return Err(SensorError::InvalidFastaFormat {
                line: self.line_number,
                msg: "Header has no sequence identifier".to_string(),
            });
        }

        let mut sequence = Vec::new();
        loop {
            if !self.next_line()? {
                self.finished = true;
                break;
            }
            let line = self.line_buffer.trim_ascii();
            if line.is_empty() {
                continue;
            }
            if line[0] == b'>' {
                self.pending_header = Some(String::from_utf8_lossy(line).into_owned());
                break;
            }
            sequence.extend_from_slice(line);
        }

        Ok(Some(FastaRecord::new(id, sequence)))
    }
}

impl<R: BufRead> Iterator for FastaStream<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
