//! Configuration module for Tekst.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    ChunkingSettings, ElasticsearchSettings, GeneralSettings, SearchSettings, Settings,
    YoutubeSettings,
};
