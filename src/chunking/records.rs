//! Persisted chunk records.
//!
//! Each chunking run writes one NDJSON file per video; the indexing layer
//! consumes it line by line. The schema (`video_id`, optional `title`,
//! `start_time`, `end_time`, `text`) is a stable interface.

use super::Chunk;
use crate::error::{Result, TekstError};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// The persisted unit: one chunk, flattened for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub video_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl ChunkRecord {
    /// Flatten a chunk into its persisted form.
    pub fn from_chunk(chunk: &Chunk, title: Option<&str>) -> Self {
        Self {
            video_id: chunk.video_id().to_string(),
            title: title.map(|t| t.to_string()),
            start_time: chunk.start_time(),
            end_time: chunk.end_time(),
            text: chunk.text(),
        }
    }
}

/// Path of the chunk file for a video: `<dir>/<video_id>.ndjson`.
pub fn chunk_file_path(dir: &Path, video_id: &str) -> PathBuf {
    dir.join(format!("{}.ndjson", video_id))
}

/// Write one `ChunkRecord` per chunk to `<dir>/<video_id>.ndjson`,
/// one JSON object per line.
///
/// The file is replaced wholesale on re-runs; files for other videos are
/// untouched. Fails with `NoChunks` when given no chunks, writing nothing.
pub fn write_chunks(chunks: &[Chunk], title: Option<&str>, dir: &Path) -> Result<PathBuf> {
    let Some(first) = chunks.first() else {
        return Err(TekstError::NoChunks("<unknown>".to_string()));
    };

    let video_id = first.video_id().to_string();
    let path = chunk_file_path(dir, &video_id);

    let mut file = std::fs::File::create(&path)?;
    for chunk in chunks {
        let record = ChunkRecord::from_chunk(chunk, title);
        serde_json::to_writer(&mut file, &record)?;
        file.write_all(b"\n")?;
    }

    info!(
        "Wrote {} chunks for video {} to {}",
        chunks.len(),
        video_id,
        path.display()
    );
    Ok(path)
}

/// Read a chunk file back into records.
///
/// Lines that are not valid records fail with `MalformedRecord`.
pub fn read_chunks(path: &Path) -> Result<Vec<ChunkRecord>> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                TekstError::MalformedRecord(format!("{}: {}", path.display(), e))
            })
        })
        .collect()
}
