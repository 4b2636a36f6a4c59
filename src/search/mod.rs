//! Index sink and query abstraction.
//!
//! The chunk stream is handed off to a search backend; the pipeline and CLI
//! only see this trait, so tests can use deterministic fakes.

mod elastic;

pub use elastic::ElasticIndex;

use crate::chunking::ChunkRecord;
use crate::error::Result;
use async_trait::async_trait;

/// A search hit for one subtitle chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Relevance score (higher is better).
    pub score: f64,
    /// Chunk start time in seconds.
    pub start_time: f64,
    /// Chunk text.
    pub text: String,
}

/// Trait for chunk index backends.
#[async_trait]
pub trait IndexSink: Send + Sync {
    /// Ingest chunk records; returns the number of documents indexed.
    ///
    /// Ownership of the records transfers to the backend: re-ingesting a
    /// video replaces its documents.
    async fn ingest(&self, records: &[ChunkRecord]) -> Result<usize>;

    /// Sparse-vector search within one video.
    async fn search(&self, video_id: &str, query: &str, size: usize) -> Result<Vec<SearchHit>>;

    /// Sparse-vector search with cross-encoder rescoring.
    async fn rerank_search(
        &self,
        video_id: &str,
        query: &str,
        size: usize,
    ) -> Result<Vec<SearchHit>>;

    /// IDs of all videos with indexed chunks.
    async fn list_video_ids(&self) -> Result<Vec<String>>;
}
