//! Ingestion pipeline for Tekst.
//!
//! Coordinates one video's run: URL → video ID → transcript → normalized
//! records → chunks → NDJSON chunk file → (optionally) the search index.

use crate::chunking::{chunk_subtitles, read_chunks, write_chunks, ChunkerConfig};
use crate::config::Settings;
use crate::error::{Result, TekstError};
use crate::search::{ElasticIndex, IndexSink};
use crate::subtitle::{normalize, TitleSource, TranscriptSource, YoutubeSubtitles};
use crate::video::extract_video_id;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The main pipeline for chunking and indexing video subtitles.
pub struct Pipeline {
    settings: Settings,
    transcript_source: Arc<dyn TranscriptSource>,
    title_source: Arc<dyn TitleSource>,
    index: Option<Arc<dyn IndexSink>>,
}

impl Pipeline {
    /// Create a pipeline with the default YouTube and Elasticsearch backends.
    ///
    /// The index is optional: chunk-only runs work without an Elasticsearch
    /// endpoint configured.
    pub fn new(settings: Settings) -> Result<Self> {
        let youtube = Arc::new(YoutubeSubtitles::with_languages(
            settings.youtube.caption_languages.clone(),
        ));

        let index = match ElasticIndex::from_settings(&settings.elasticsearch) {
            Ok(idx) => Some(Arc::new(idx) as Arc<dyn IndexSink>),
            Err(TekstError::Config(_)) => None,
            Err(e) => return Err(e),
        };

        Ok(Self {
            settings,
            transcript_source: youtube.clone(),
            title_source: youtube,
            index,
        })
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        transcript_source: Arc<dyn TranscriptSource>,
        title_source: Arc<dyn TitleSource>,
        index: Option<Arc<dyn IndexSink>>,
    ) -> Self {
        Self {
            settings,
            transcript_source,
            title_source,
            index,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the index backend, failing if none is configured.
    pub fn index(&self) -> Result<&Arc<dyn IndexSink>> {
        self.index.as_ref().ok_or_else(|| {
            TekstError::Config(
                "Elasticsearch endpoint not set (elasticsearch.endpoint or ELASTIC_ENDPOINT)"
                    .to_string(),
            )
        })
    }

    /// Process a video URL: extract the ID, then chunk (and optionally index).
    pub async fn process_url(&self, url: &str, ingest: bool) -> Result<ProcessResult> {
        let video_id = extract_video_id(url)?;
        self.process_video(&video_id, ingest).await
    }

    /// Process one video by ID.
    ///
    /// Failures abort this video's run only; chunk files of other videos are
    /// never touched.
    #[instrument(skip(self))]
    pub async fn process_video(&self, video_id: &str, ingest: bool) -> Result<ProcessResult> {
        info!("Fetching transcript for {}", video_id);
        let raw = self.transcript_source.fetch_transcript(video_id).await?;
        let records = normalize(raw, video_id)?;
        info!("Normalized {} subtitle records", records.len());

        let config = ChunkerConfig {
            chunk_size: self.settings.chunking.chunk_seconds,
            overlap: self.settings.chunking.overlap_seconds,
        };
        let chunks = chunk_subtitles(&records, &config)?;

        if chunks.is_empty() {
            warn!("No chunks produced for video {}", video_id);
            return Ok(ProcessResult {
                video_id: video_id.to_string(),
                title: None,
                chunks_written: 0,
                chunks_ingested: 0,
                chunk_file: None,
            });
        }

        // Title lookup is best-effort; the record's title field is optional.
        let title = match self.title_source.fetch_title(video_id).await {
            Ok(title) => Some(title),
            Err(e) => {
                warn!("Title lookup failed for {}: {}", video_id, e);
                None
            }
        };

        let dir = self.settings.chunks_dir();
        std::fs::create_dir_all(&dir)?;
        let path = write_chunks(&chunks, title.as_deref(), &dir)?;

        let ingested = if ingest {
            let index = self.index()?;
            let records = read_chunks(&path)?;
            info!("Ingesting {} chunks for video {}", records.len(), video_id);
            index.ingest(&records).await?
        } else {
            0
        };

        Ok(ProcessResult {
            video_id: video_id.to_string(),
            title,
            chunks_written: chunks.len(),
            chunks_ingested: ingested,
            chunk_file: Some(path),
        })
    }

    /// List indexed videos as `(video_id, title)` pairs.
    pub async fn list_videos(&self) -> Result<Vec<(String, String)>> {
        let index = self.index()?;
        let ids = index.list_video_ids().await?;

        let mut videos = Vec::with_capacity(ids.len());
        for id in ids {
            let title = self
                .title_source
                .fetch_title(&id)
                .await
                .unwrap_or_else(|_| "Title not found".to_string());
            videos.push((id, title));
        }
        Ok(videos)
    }
}

/// Result of processing one video.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub video_id: String,
    pub title: Option<String>,
    pub chunks_written: usize,
    pub chunks_ingested: usize,
    pub chunk_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ChunkRecord;
    use crate::search::SearchHit;
    use crate::subtitle::RawSubtitle;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeTranscripts {
        entries: Vec<RawSubtitle>,
        available: bool,
    }

    #[async_trait]
    impl TranscriptSource for FakeTranscripts {
        async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<RawSubtitle>> {
            if !self.available {
                return Err(TekstError::TranscriptUnavailable(
                    video_id.to_string(),
                    "captions disabled".to_string(),
                ));
            }
            Ok(self.entries.clone())
        }
    }

    struct FakeTitles {
        title: Option<String>,
    }

    #[async_trait]
    impl TitleSource for FakeTitles {
        async fn fetch_title(&self, video_id: &str) -> Result<String> {
            self.title.clone().ok_or_else(|| {
                TekstError::ToolFailed(format!("no title for {}", video_id))
            })
        }
    }

    #[derive(Default)]
    struct FakeIndex {
        ingested: Mutex<Vec<ChunkRecord>>,
    }

    #[async_trait]
    impl IndexSink for FakeIndex {
        async fn ingest(&self, records: &[ChunkRecord]) -> Result<usize> {
            let mut ingested = self.ingested.lock().unwrap();
            ingested.extend_from_slice(records);
            Ok(records.len())
        }

        async fn search(&self, _: &str, _: &str, _: usize) -> Result<Vec<SearchHit>> {
            Ok(Vec::new())
        }

        async fn rerank_search(&self, _: &str, _: &str, _: usize) -> Result<Vec<SearchHit>> {
            Ok(Vec::new())
        }

        async fn list_video_ids(&self) -> Result<Vec<String>> {
            let ingested = self.ingested.lock().unwrap();
            let mut ids: Vec<String> = ingested.iter().map(|r| r.video_id.clone()).collect();
            ids.dedup();
            Ok(ids)
        }
    }

    fn test_settings(dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.general.data_dir = dir.to_string_lossy().to_string();
        settings
    }

    fn entries() -> Vec<RawSubtitle> {
        vec![
            RawSubtitle {
                start: 0.0,
                duration: 5.0,
                text: "a".to_string(),
            },
            RawSubtitle {
                start: 4.0,
                duration: 5.0,
                text: "b".to_string(),
            },
            RawSubtitle {
                start: 70.0,
                duration: 5.0,
                text: "c".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_process_video_chunks_and_ingests() {
        let dir = tempfile::tempdir().unwrap();
        let index = Arc::new(FakeIndex::default());

        let pipeline = Pipeline::with_components(
            test_settings(dir.path()),
            Arc::new(FakeTranscripts {
                entries: entries(),
                available: true,
            }),
            Arc::new(FakeTitles {
                title: Some("Some Video".to_string()),
            }),
            Some(index.clone()),
        );

        let result = pipeline.process_video("dQw4w9WgXcQ", true).await.unwrap();

        assert_eq!(result.chunks_written, 2);
        assert_eq!(result.chunks_ingested, 2);
        assert_eq!(result.title.as_deref(), Some("Some Video"));
        assert!(result.chunk_file.unwrap().exists());

        let ingested = index.ingested.lock().unwrap();
        assert_eq!(ingested.len(), 2);
        assert_eq!(ingested[0].text, "a b");
        assert_eq!(ingested[0].title.as_deref(), Some("Some Video"));
        assert_eq!(ingested[1].text, "c");
    }

    #[tokio::test]
    async fn test_process_url_extracts_id_first() {
        let dir = tempfile::tempdir().unwrap();

        let pipeline = Pipeline::with_components(
            test_settings(dir.path()),
            Arc::new(FakeTranscripts {
                entries: entries(),
                available: true,
            }),
            Arc::new(FakeTitles { title: None }),
            None,
        );

        let result = pipeline
            .process_url("https://youtu.be/dQw4w9WgXcQ", false)
            .await
            .unwrap();
        assert_eq!(result.video_id, "dQw4w9WgXcQ");

        let bad = pipeline.process_url("https://example.com/video", false).await;
        assert!(matches!(bad, Err(TekstError::VideoNotFound(_))));
    }

    #[tokio::test]
    async fn test_title_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();

        let pipeline = Pipeline::with_components(
            test_settings(dir.path()),
            Arc::new(FakeTranscripts {
                entries: entries(),
                available: true,
            }),
            Arc::new(FakeTitles { title: None }),
            None,
        );

        let result = pipeline.process_video("dQw4w9WgXcQ", false).await.unwrap();

        assert_eq!(result.title, None);
        assert_eq!(result.chunks_written, 2);
        assert_eq!(result.chunks_ingested, 0);
    }

    #[tokio::test]
    async fn test_unavailable_transcript_propagates() {
        let dir = tempfile::tempdir().unwrap();

        let pipeline = Pipeline::with_components(
            test_settings(dir.path()),
            Arc::new(FakeTranscripts {
                entries: Vec::new(),
                available: false,
            }),
            Arc::new(FakeTitles { title: None }),
            None,
        );

        let result = pipeline.process_video("dQw4w9WgXcQ", false).await;
        assert!(matches!(
            result,
            Err(TekstError::TranscriptUnavailable(_, _))
        ));
    }

    #[tokio::test]
    async fn test_empty_transcript_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();

        let pipeline = Pipeline::with_components(
            test_settings(dir.path()),
            Arc::new(FakeTranscripts {
                entries: Vec::new(),
                available: true,
            }),
            Arc::new(FakeTitles { title: None }),
            None,
        );

        let result = pipeline.process_video("dQw4w9WgXcQ", false).await.unwrap();

        assert_eq!(result.chunks_written, 0);
        assert!(result.chunk_file.is_none());
        assert!(!dir.path().join("chunks/dQw4w9WgXcQ.ndjson").exists());
    }

    #[tokio::test]
    async fn test_ingest_without_index_fails() {
        let dir = tempfile::tempdir().unwrap();

        let pipeline = Pipeline::with_components(
            test_settings(dir.path()),
            Arc::new(FakeTranscripts {
                entries: entries(),
                available: true,
            }),
            Arc::new(FakeTitles { title: None }),
            None,
        );

        let result = pipeline.process_video("dQw4w9WgXcQ", true).await;
        assert!(matches!(result, Err(TekstError::Config(_))));
    }
}
