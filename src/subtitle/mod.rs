//! Transcript fetching and normalization.
//!
//! Providers deliver raw `{start, duration, text}` triples; normalization
//! validates them and binds them to their video.

mod youtube;

pub use youtube::YoutubeSubtitles;

use crate::error::{Result, TekstError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One raw subtitle entry as delivered by a transcript provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSubtitle {
    /// Seconds from video start.
    pub start: f64,
    /// Display duration in seconds.
    pub duration: f64,
    /// Subtitle text, may be empty.
    pub text: String,
}

/// One normalized subtitle entry, bound to its video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleRecord {
    /// Seconds from video start.
    pub start: f64,
    /// Display duration in seconds.
    pub duration: f64,
    /// Subtitle text, may be empty.
    pub text: String,
    /// Video this record belongs to.
    pub video_id: String,
}

impl SubtitleRecord {
    /// End of this record's display window.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Validate raw provider entries and attach the video ID.
///
/// The provider guarantees non-decreasing `start` order; the input order is
/// preserved, not re-sorted. Non-finite or negative times are rejected as
/// `MalformedRecord`.
pub fn normalize(raw: Vec<RawSubtitle>, video_id: &str) -> Result<Vec<SubtitleRecord>> {
    raw.into_iter()
        .map(|entry| {
            if !entry.start.is_finite() || entry.start < 0.0 {
                return Err(TekstError::MalformedRecord(format!(
                    "invalid start time {} in video {}",
                    entry.start, video_id
                )));
            }
            if !entry.duration.is_finite() || entry.duration < 0.0 {
                return Err(TekstError::MalformedRecord(format!(
                    "invalid duration {} in video {}",
                    entry.duration, video_id
                )));
            }
            Ok(SubtitleRecord {
                start: entry.start,
                duration: entry.duration,
                text: entry.text,
                video_id: video_id.to_string(),
            })
        })
        .collect()
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the ordered subtitle entries for a video.
    ///
    /// Fails with `TranscriptUnavailable` when the video has no captions.
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<RawSubtitle>>;
}

/// Trait for video title providers.
#[async_trait]
pub trait TitleSource: Send + Sync {
    /// Look up the display title for a video.
    async fn fetch_title(&self, video_id: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_attaches_video_id() {
        let raw = vec![
            RawSubtitle {
                start: 0.0,
                duration: 2.5,
                text: "hello".to_string(),
            },
            RawSubtitle {
                start: 2.5,
                duration: 3.0,
                text: String::new(),
            },
        ];

        let records = normalize(raw, "dQw4w9WgXcQ").unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.video_id == "dQw4w9WgXcQ"));
        assert_eq!(records[0].text, "hello");
        assert_eq!(records[1].text, "");
        assert_eq!(records[1].end(), 5.5);
    }

    #[test]
    fn test_normalize_rejects_negative_start() {
        let raw = vec![RawSubtitle {
            start: -1.0,
            duration: 2.0,
            text: "x".to_string(),
        }];

        assert!(matches!(
            normalize(raw, "v"),
            Err(TekstError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_non_finite_duration() {
        let raw = vec![RawSubtitle {
            start: 0.0,
            duration: f64::NAN,
            text: "x".to_string(),
        }];

        assert!(matches!(
            normalize(raw, "v"),
            Err(TekstError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize(Vec::new(), "v").unwrap().is_empty());
    }
}
