//! YouTube subtitle provider.
//!
//! Caption track discovery goes through yt-dlp metadata; the track payload
//! itself is fetched over HTTP in YouTube's `json3` format.

use super::{RawSubtitle, TitleSource, TranscriptSource};
use crate::error::{Result, TekstError};
use async_trait::async_trait;

/// YouTube transcript and title provider backed by yt-dlp.
pub struct YoutubeSubtitles {
    client: reqwest::Client,
    /// Caption languages to try, in preference order.
    languages: Vec<String>,
}

impl YoutubeSubtitles {
    pub fn new() -> Self {
        Self::with_languages(vec![
            "en".to_string(),
            "en-US".to_string(),
            "en-GB".to_string(),
        ])
    }

    pub fn with_languages(languages: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            languages,
        }
    }

    /// Fetch video metadata using yt-dlp.
    async fn dump_metadata(&self, video_id: &str) -> Result<serde_json::Value> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--ignore-errors",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TekstError::ToolNotFound("yt-dlp".to_string())
                } else {
                    TekstError::ToolFailed(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TekstError::ToolFailed(format!(
                "yt-dlp failed for video {}: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str)
            .map_err(|e| TekstError::ToolFailed(format!("Failed to parse yt-dlp output: {}", e)))
    }

    /// Find a `json3` caption track URL for one of the preferred languages.
    ///
    /// Manually uploaded subtitles take precedence over automatic captions.
    fn caption_track_url(metadata: &serde_json::Value, languages: &[String]) -> Option<String> {
        for section in ["subtitles", "automatic_captions"] {
            let Some(tracks) = metadata[section].as_object() else {
                continue;
            };
            for lang in languages {
                let Some(formats) = tracks.get(lang).and_then(|v| v.as_array()) else {
                    continue;
                };
                for format in formats {
                    if format["ext"].as_str() == Some("json3") {
                        if let Some(url) = format["url"].as_str() {
                            return Some(url.to_string());
                        }
                    }
                }
            }
        }
        None
    }

    /// Parse a `json3` caption payload into raw subtitle entries.
    fn parse_json3(payload: &serde_json::Value) -> Vec<RawSubtitle> {
        let Some(events) = payload["events"].as_array() else {
            return Vec::new();
        };

        events
            .iter()
            .filter_map(|event| {
                let segs = event["segs"].as_array()?;
                let text = segs
                    .iter()
                    .filter_map(|seg| seg["utf8"].as_str())
                    .collect::<String>()
                    .replace('\n', " ")
                    .trim()
                    .to_string();
                if text.is_empty() {
                    return None;
                }

                let start = event["tStartMs"].as_f64()? / 1000.0;
                let duration = event["dDurationMs"].as_f64().unwrap_or(0.0) / 1000.0;

                Some(RawSubtitle {
                    start,
                    duration,
                    text,
                })
            })
            .collect()
    }
}

impl Default for YoutubeSubtitles {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for YoutubeSubtitles {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<RawSubtitle>> {
        let metadata = self.dump_metadata(video_id).await?;

        let track_url =
            Self::caption_track_url(&metadata, &self.languages).ok_or_else(|| {
                TekstError::TranscriptUnavailable(
                    video_id.to_string(),
                    "no caption track available".to_string(),
                )
            })?;

        let payload: serde_json::Value = self
            .client
            .get(&track_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Self::parse_json3(&payload))
    }
}

#[async_trait]
impl TitleSource for YoutubeSubtitles {
    async fn fetch_title(&self, video_id: &str) -> Result<String> {
        let metadata = self.dump_metadata(video_id).await?;
        Ok(metadata["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_caption_track_url_prefers_manual_subtitles() {
        let metadata = json!({
            "subtitles": {
                "en": [
                    {"ext": "vtt", "url": "https://example.com/manual.vtt"},
                    {"ext": "json3", "url": "https://example.com/manual.json3"}
                ]
            },
            "automatic_captions": {
                "en": [{"ext": "json3", "url": "https://example.com/auto.json3"}]
            }
        });

        let url = YoutubeSubtitles::caption_track_url(&metadata, &["en".to_string()]);
        assert_eq!(url.as_deref(), Some("https://example.com/manual.json3"));
    }

    #[test]
    fn test_caption_track_url_falls_back_to_auto_captions() {
        let metadata = json!({
            "automatic_captions": {
                "en": [{"ext": "json3", "url": "https://example.com/auto.json3"}]
            }
        });

        let url = YoutubeSubtitles::caption_track_url(&metadata, &["en".to_string()]);
        assert_eq!(url.as_deref(), Some("https://example.com/auto.json3"));
    }

    #[test]
    fn test_caption_track_url_missing() {
        let metadata = json!({"subtitles": {}});
        assert!(YoutubeSubtitles::caption_track_url(&metadata, &["en".to_string()]).is_none());
    }

    #[test]
    fn test_parse_json3() {
        let payload = json!({
            "events": [
                {"tStartMs": 0, "dDurationMs": 2500, "segs": [{"utf8": "hello "}, {"utf8": "world"}]},
                {"tStartMs": 2500, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 3000, "dDurationMs": 1500, "segs": [{"utf8": "again"}]}
            ]
        });

        let entries = YoutubeSubtitles::parse_json3(&payload);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start, 0.0);
        assert_eq!(entries[0].duration, 2.5);
        assert_eq!(entries[0].text, "hello world");
        assert_eq!(entries[1].start, 3.0);
        assert_eq!(entries[1].text, "again");
    }
}
