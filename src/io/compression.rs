//! Transparent gzip handling for inputs and outputs
//!
//! Inputs are sniffed for the gzip magic bytes (`1f 8b`) rather than trusting
//! the file extension, so `genome.fna` that happens to be compressed still
//! reads correctly. Outputs pick compression from the sink's extension.

use crate::error::{Result, SensorError};
use crate::io::DataSink;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Input buffer size for file readers
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Data source abstraction for sequence and annotation inputs
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        match self {
            DataSource::Local(path) => path,
        }
    }

    /// Open the data source and return a buffered reader
    ///
    /// A missing file is reported as [`SensorError::MissingInput`] so the
    /// caller can name the offending path.
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            DataSource::Local(path) => {
                if !path.exists() {
                    return Err(SensorError::MissingInput { path: path.clone() });
                }
                let file = File::open(path)?;
                Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
            }
        }
    }
}

/// Reader that decompresses gzip input on the fly and passes plain input through
pub struct CompressedReader {
    inner: Box<dyn BufRead + Send>,
}

impl CompressedReader {
    /// Open a data source, detecting gzip from its first two bytes
    pub fn new(source: DataSource) -> Result<Self> {
        let reader = source.open()?;
        Ok(Self::from_buf_read(reader)?)
    }

    /// Wrap an already-open reader, detecting gzip from its first two bytes
    pub fn from_buf_read(mut reader: Box<dyn BufRead + Send>) -> io::Result<Self> {
        let is_gzipped = {
            let peeked = reader.fill_buf()?;
            peeked.len() >= 2 && peeked[0] == 0x1f && peeked[1] == 0x8b
        };

        if is_gzipped {
            // MultiGzDecoder also handles bgzip (concatenated gzip members)
            let decoder = MultiGzDecoder::new(reader);
            Ok(Self {
                inner: Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, decoder)),
            })
        } else {
            Ok(Self { inner: reader })
        }
    }

    /// Get the inner buffered reader
    pub fn into_inner(self) -> Box<dyn BufRead + Send> {
        self.inner
    }
}

impl Read for CompressedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for CompressedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// Writer for table output, plain or gzip compressed
///
/// Call [`CompressedWriter::finish`] to write the gzip trailer; dropping the
/// writer finishes it on a best-effort basis.
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(Option<BufWriter<Box<dyn Write>>>),

    /// Gzip compressed writer (flate2, default level)
    Gzip(Option<GzEncoder<BufWriter<Box<dyn Write>>>>),
}

impl CompressedWriter {
    /// Create a new writer from a data sink
    ///
    /// - `.gz` / `.gzip` → gzip compression
    /// - other or stdout → uncompressed
    pub fn new(sink: DataSink) -> io::Result<Self> {
        let compressed = sink.is_compressed();
        let writer: Box<dyn Write> = match sink {
            DataSink::Local(path) => Box::new(File::create(&path)?),
            DataSink::Stdout => Box::new(io::stdout()),
        };
        if compressed {
            Self::new_gzip(writer)
        } else {
            Self::new_plain(writer)
        }
    }

    /// Create a plain (uncompressed) writer
    pub fn new_plain(writer: Box<dyn Write>) -> io::Result<Self> {
        Ok(Self::Plain(Some(BufWriter::new(writer))))
    }

    /// Create a gzip compressed writer
    pub fn new_gzip(writer: Box<dyn Write>) -> io::Result<Self> {
        let encoder = GzEncoder::new(BufWriter::new(writer), Compression::default());
        Ok(Self::Gzip(Some(encoder)))
    }

    /// Flush buffered output and finalize compression
    pub fn finish(mut self) -> io::Result<()> {
        self.finish_inner()
    }

    fn finish_inner(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(writer) => {
                if let Some(mut w) = writer.take() {
                    w.flush()?;
                }
            }
            Self::Gzip(encoder) => {
                if let Some(e) = encoder.take() {
                    let mut inner = e.finish()?;
                    inner.flush()?;
                }
            }
        }
        Ok(())
    }

    fn closed() -> io::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, "writer already finished")
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(Some(w)) => w.write(buf),
            Self::Gzip(Some(e)) => e.write(buf),
            _ => Err(Self::closed()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(Some(w)) => w.flush(),
            Self::Gzip(Some(e)) => e.flush(),
            _ => Ok(()),
        }
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        let _ = self.finish_inner();
    }
}
