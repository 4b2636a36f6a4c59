//! Tekst - Semantic Subtitle Search
//!
//! A CLI tool for semantic search over YouTube video subtitles.
//!
//! The name "Tekst" comes from the Norwegian word for "text" (as in
//! *undertekst*, "subtitle").
//!
//! # Overview
//!
//! Tekst allows you to:
//! - Fetch the subtitle track of a YouTube video
//! - Split it into time-windowed text chunks and persist them as NDJSON
//! - Index the chunks into Elasticsearch with ELSER sparse-vector embeddings
//! - Search within a video semantically, with optional cross-encoder reranking
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video` - Video ID extraction from URLs
//! - `subtitle` - Transcript fetching and normalization
//! - `chunking` - The subtitle chunking algorithm and NDJSON records
//! - `search` - Elasticsearch index sink and query client
//! - `pipeline` - Ingestion pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use tekst::config::Settings;
//! use tekst::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     // Chunk and index the subtitles of a YouTube video
//!     let result = pipeline.process_url("https://youtu.be/dQw4w9WgXcQ", true).await?;
//!     println!("Indexed {} chunks", result.chunks_ingested);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod search;
pub mod subtitle;
pub mod video;

pub use error::{Result, TekstError};
