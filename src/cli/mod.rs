//! CLI module for Tekst.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tekst - Semantic Subtitle Search
///
/// A CLI tool for semantic search over YouTube video subtitles.
/// The name "Tekst" comes from the Norwegian word for "text."
#[derive(Parser, Debug)]
#[command(name = "tekst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Tekst and verify system requirements
    Init,

    /// Chunk a video's subtitles into an NDJSON file without indexing
    Chunk {
        /// YouTube URL or bare video ID
        url: String,
    },

    /// Chunk a video's subtitles and index them into Elasticsearch
    Ingest {
        /// YouTube URL or bare video ID
        url: String,
    },

    /// Search within an indexed video
    Search {
        /// Search query
        query: String,

        /// Video ID to search within
        #[arg(long)]
        video: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Minimum score for a result to be shown
        #[arg(short, long)]
        min_score: Option<f64>,

        /// Rerank results with the cross-encoder model
        #[arg(short, long)]
        rerank: bool,
    },

    /// List indexed videos
    List,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "chunking.chunk_seconds")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Print the configuration file path
    Path,
}
