//! Binary gaze session recording ("gaze bags").
//!
//! A bag is a fixed-size header followed by length-prefixed Postcard
//! frames, one per [`GazeSample`]. The header is rewritten when the
//! recorder finishes, so a bag cut short by a crash still replays up to
//! the last complete frame.

use crate::core::types::GazeSample;
use crate::validation::source::ReplaySource;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Magic bytes identifying a gaze bag.
const BAG_MAGIC: [u8; 4] = *b"DRGZ";
/// Bag format version.
const BAG_VERSION: u16 = 1;
/// Reserved header space at the start of the file.
const HEADER_SIZE: usize = 48;

/// Errors from bag recording and playback.
#[derive(Error, Debug)]
pub enum BagError {
    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// (De)serialization failure.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// The file is not a valid gaze bag.
    #[error("invalid bag format: {0}")]
    InvalidFormat(String),
}

impl From<postcard::Error> for BagError {
    fn from(e: postcard::Error) -> Self {
        BagError::Serialize(e.to_string())
    }
}

/// Convenience alias for bag I/O results.
pub type Result<T> = std::result::Result<T, BagError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BagHeader {
    magic: [u8; 4],
    version: u16,
    sample_count: u64,
    start_time_ms: f64,
    end_time_ms: f64,
}

impl BagHeader {
    fn is_valid(&self) -> bool {
        self.magic == BAG_MAGIC && self.version == BAG_VERSION
    }
}

/// Summary of a finished recording.
#[derive(Debug, Clone)]
pub struct BagInfo {
    /// Number of samples written.
    pub sample_count: u64,
    /// Recording span in milliseconds.
    pub duration_ms: f64,
    /// Path of the bag file.
    pub path: PathBuf,
}

/// Gaze bag recorder.
pub struct GazeBagRecorder {
    writer: BufWriter<File>,
    path: PathBuf,
    sample_count: u64,
    start_time_ms: Option<f64>,
    end_time_ms: f64,
}

impl GazeBagRecorder {
    /// Create a bag at `path`, reserving header space. Call
    /// [`finish`](Self::finish) to write the final header.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&[0u8; HEADER_SIZE])?;

        Ok(Self {
            writer,
            path,
            sample_count: 0,
            start_time_ms: None,
            end_time_ms: 0.0,
        })
    }

    /// Append one sample.
    pub fn record(&mut self, sample: &GazeSample) -> Result<()> {
        let bytes = postcard::to_allocvec(sample)?;
        self.writer.write_all(&(bytes.len() as u32).to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.sample_count += 1;
        if self.start_time_ms.is_none() {
            self.start_time_ms = Some(sample.time_ms);
        }
        self.end_time_ms = sample.time_ms;
        Ok(())
    }

    /// Write the final header and close the file.
    pub fn finish(mut self) -> Result<BagInfo> {
        let start = self.start_time_ms.unwrap_or(0.0);
        let header = BagHeader {
            magic: BAG_MAGIC,
            version: BAG_VERSION,
            sample_count: self.sample_count,
            start_time_ms: start,
            end_time_ms: self.end_time_ms,
        };

        let header_bytes = postcard::to_allocvec(&header)?;
        if header_bytes.len() > HEADER_SIZE {
            return Err(BagError::Serialize(
                "bag header exceeds reserved space".to_string(),
            ));
        }
        let mut buffer = [0u8; HEADER_SIZE];
        buffer[..header_bytes.len()].copy_from_slice(&header_bytes);

        self.writer.flush()?;
        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&buffer)?;
        file.flush()?;

        log::info!(
            "gaze bag {}: {} samples, {:.1} ms",
            self.path.display(),
            self.sample_count,
            self.end_time_ms - start
        );
        Ok(BagInfo {
            sample_count: self.sample_count,
            duration_ms: self.end_time_ms - start,
            path: self.path,
        })
    }
}

/// Gaze bag player.
pub struct GazeBagPlayer {
    reader: BufReader<File>,
    /// `None` when the recorder never finished and the reserved header
    /// space is still zeroed.
    header: Option<BagHeader>,
    samples_read: u64,
}

impl GazeBagPlayer {
    /// Open a bag for playback, verifying magic and version.
    ///
    /// A recorder that crashed before [`GazeBagRecorder::finish`] leaves
    /// the reserved header space zeroed; such a bag opens as unfinished
    /// and replays up to the last complete frame.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut buffer = [0u8; HEADER_SIZE];
        reader.read_exact(&mut buffer)?;
        let header = if buffer.iter().all(|b| *b == 0) {
            log::warn!("bag header missing, replaying unfinished recording");
            None
        } else {
            let header: BagHeader = postcard::from_bytes(&buffer)
                .map_err(|e| BagError::InvalidFormat(format!("bad header: {}", e)))?;
            if !header.is_valid() {
                return Err(BagError::InvalidFormat(
                    "magic bytes or version mismatch".to_string(),
                ));
            }
            Some(header)
        };

        Ok(Self {
            reader,
            header,
            samples_read: 0,
        })
    }

    /// Whether the recorder wrote its final header.
    pub fn is_finished(&self) -> bool {
        self.header.is_some()
    }

    /// Number of samples the recorder wrote. Unknown for an unfinished
    /// bag until the frames have been read.
    pub fn sample_count(&self) -> Option<u64> {
        self.header.as_ref().map(|h| h.sample_count)
    }

    /// Recording span in milliseconds. Unknown for an unfinished bag.
    pub fn duration_ms(&self) -> Option<f64> {
        self.header
            .as_ref()
            .map(|h| h.end_time_ms - h.start_time_ms)
    }

    /// Samples decoded so far.
    pub fn samples_read(&self) -> u64 {
        self.samples_read
    }

    /// Read the next sample, or `None` at end of bag. In an unfinished
    /// bag a torn trailing frame marks the end rather than an error.
    pub fn next(&mut self) -> Result<Option<GazeSample>> {
        let mut len_buf = [0u8; 4];
        match self.reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_le_bytes(len_buf) as usize;
        let mut payload = vec![0u8; len];
        match self.reader.read_exact(&mut payload) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof && self.header.is_none() => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        }

        let sample: GazeSample = postcard::from_bytes(&payload)?;
        self.samples_read += 1;
        Ok(Some(sample))
    }

    /// Drain the remaining samples.
    pub fn read_all(mut self) -> Result<Vec<GazeSample>> {
        let mut samples = Vec::with_capacity(self.sample_count().unwrap_or(0) as usize);
        while let Some(s) = self.next()? {
            samples.push(s);
        }
        Ok(samples)
    }

    /// Turn the remaining samples into a replayable gaze source.
    pub fn into_source(self) -> Result<ReplaySource> {
        Ok(ReplaySource::new(self.read_all()?))
    }
}
