//! The subtitle chunking algorithm.
//!
//! Groups an ordered subtitle sequence into bounded, time-windowed chunks
//! suitable for embedding and retrieval.

mod records;

pub use records::{chunk_file_path, read_chunks, write_chunks, ChunkRecord};

use crate::error::{Result, TekstError};
use crate::subtitle::SubtitleRecord;

/// Configuration for the chunker.
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    /// Maximum window growth in seconds before the window slides forward.
    pub chunk_size: f64,
    /// Time tolerance in seconds: gap allowance before a new chunk starts,
    /// and look-back margin left when the window slides.
    pub overlap: f64,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 60.0,
            overlap: 10.0,
        }
    }
}

/// A contiguous, time-bounded group of subtitle records.
///
/// Always non-empty; all records share one `video_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    records: Vec<SubtitleRecord>,
}

impl Chunk {
    fn new(records: Vec<SubtitleRecord>) -> Self {
        debug_assert!(!records.is_empty());
        Self { records }
    }

    /// The member records, in input order.
    pub fn records(&self) -> &[SubtitleRecord] {
        &self.records
    }

    /// Video all member records belong to.
    pub fn video_id(&self) -> &str {
        &self.records[0].video_id
    }

    /// Start of the chunk's span: the first record's start time.
    pub fn start_time(&self) -> f64 {
        self.records[0].start
    }

    /// End of the chunk's span: the last record's start plus its duration.
    pub fn end_time(&self) -> f64 {
        let last = &self.records[self.records.len() - 1];
        last.start + last.duration
    }

    /// Space-joined concatenation of the member texts, order preserved.
    pub fn text(&self) -> String {
        self.records
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split an ordered subtitle sequence into chunks.
///
/// Sliding accumulation over elapsed time: a record further than `overlap`
/// seconds past the current window start closes the open chunk and starts a
/// new window at that record; a record reaching past `chunk_size` seconds of
/// window growth slides the window forward, leaving `overlap` seconds of
/// look-back. Every record lands in exactly one chunk; `overlap` is a time
/// tolerance only and never duplicates a record into two chunks.
///
/// Records must be in non-decreasing `start` order (provider guarantee;
/// not re-sorted here). An empty input yields an empty output.
pub fn chunk_subtitles(
    records: &[SubtitleRecord],
    config: &ChunkerConfig,
) -> Result<Vec<Chunk>> {
    if config.chunk_size <= 0.0 {
        return Err(TekstError::InvalidConfiguration(format!(
            "chunk_size must be positive, got {}",
            config.chunk_size
        )));
    }

    let mut chunks = Vec::new();
    let mut current_chunk: Vec<SubtitleRecord> = Vec::new();
    let mut current_time = 0.0_f64;

    for record in records {
        if record.start > current_time + config.overlap {
            if !current_chunk.is_empty() {
                chunks.push(Chunk::new(std::mem::take(&mut current_chunk)));
            }
            current_time = record.start;
        }

        current_chunk.push(record.clone());

        if record.start + record.duration > current_time + config.chunk_size {
            current_time = record.start + record.duration - config.overlap;
        }
    }

    if !current_chunk.is_empty() {
        chunks.push(Chunk::new(current_chunk));
    }

    Ok(chunks)
}
