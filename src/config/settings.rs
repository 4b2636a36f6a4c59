//! Configuration settings for Tekst.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub chunking: ChunkingSettings,
    pub youtube: YoutubeSettings,
    pub elasticsearch: ElasticsearchSettings,
    pub search: SearchSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing chunk files.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.tekst".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Subtitle chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum window growth in seconds before the window slides.
    pub chunk_seconds: f64,
    /// Gap tolerance / look-back margin in seconds.
    pub overlap_seconds: f64,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_seconds: 60.0,
            overlap_seconds: 10.0,
        }
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Caption languages to try, in preference order.
    pub caption_languages: Vec<String>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            caption_languages: vec![
                "en".to_string(),
                "en-US".to_string(),
                "en-GB".to_string(),
            ],
        }
    }
}

/// Elasticsearch connection and query settings.
///
/// `endpoint` and `api_key` fall back to the `ELASTIC_ENDPOINT` and
/// `ELASTIC_API_KEY` environment variables when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchSettings {
    /// Cluster endpoint URL.
    pub endpoint: Option<String>,
    /// API key for authentication.
    pub api_key: Option<String>,
    /// Index holding the subtitle chunks.
    pub index: String,
    /// ELSER sparse-vector inference endpoint ID.
    pub inference_id: String,
    /// Cross-encoder model ID used for rescoring.
    pub rerank_model_id: String,
    /// Rescore window size.
    pub rescore_window: u32,
    /// Weight of the original query score during rescoring.
    pub query_weight: f64,
    /// Weight of the rescore query during rescoring.
    pub rescore_query_weight: f64,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            index: "youtube_subtitles".to_string(),
            inference_id: "my-elser-endpoint".to_string(),
            rerank_model_id: "cross-encoder__ms-marco-minilm-l-6-v2".to_string(),
            rescore_window: 50,
            query_weight: 0.3,
            rescore_query_weight: 0.7,
        }
    }
}

impl ElasticsearchSettings {
    /// Resolve the endpoint from config or environment.
    pub fn resolve_endpoint(&self) -> crate::error::Result<String> {
        self.endpoint
            .clone()
            .or_else(|| std::env::var("ELASTIC_ENDPOINT").ok())
            .ok_or_else(|| {
                crate::error::TekstError::Config(
                    "Elasticsearch endpoint not set (elasticsearch.endpoint or ELASTIC_ENDPOINT)"
                        .to_string(),
                )
            })
    }

    /// Resolve the API key from config or environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ELASTIC_API_KEY").ok())
    }
}

/// Search presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum number of results to request.
    pub size: usize,
    /// Minimum score for a hit to be shown.
    pub min_score: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            size: 10,
            min_score: 3.0,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TekstError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tekst")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Directory where per-video chunk files are written.
    pub fn chunks_dir(&self) -> PathBuf {
        self.data_dir().join("chunks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_chunker_contract() {
        let settings = Settings::default();
        assert_eq!(settings.chunking.chunk_seconds, 60.0);
        assert_eq!(settings.chunking.overlap_seconds, 10.0);
        assert_eq!(settings.search.min_score, 3.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [elasticsearch]
            index = "my_subtitles"
        "#,
        )
        .unwrap();

        assert_eq!(settings.elasticsearch.index, "my_subtitles");
        assert_eq!(settings.elasticsearch.inference_id, "my-elser-endpoint");
        assert_eq!(settings.chunking.chunk_seconds, 60.0);
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.chunking.chunk_seconds = 90.0;
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(reloaded.chunking.chunk_seconds, 90.0);
    }
}
