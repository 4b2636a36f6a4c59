//! Video ID extraction from YouTube URLs.

use crate::error::{Result, TekstError};
use regex::Regex;
use std::sync::OnceLock;

/// Path segments that indicate a non-video YouTube URL (channel pages,
/// playlists, etc.) from which no single video ID should be extracted.
const EXCLUDED_SEGMENTS: [&str; 4] = ["/videos", "/channel", "/user", "/playlist"];

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Matches the video ID in the common YouTube URL shapes, or a bare ID
        Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com|youtu\.be)/
                (?:watch\?v=|embed/|v/|shorts/|live/)?
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex")
    })
}

/// Extract the canonical 11-character video ID from a YouTube URL or a
/// bare ID.
///
/// Tolerates the usual URL variants (`watch?v=`, `youtu.be/`, `embed/`,
/// `v/`, `shorts/`, `live/`) and rejects channel/user/playlist pages.
pub fn extract_video_id(url: &str) -> Result<String> {
    let url = url.trim();

    if EXCLUDED_SEGMENTS.iter().any(|seg| url.contains(seg)) {
        return Err(TekstError::VideoNotFound(url.to_string()));
    }

    video_id_regex()
        .captures(url)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TekstError::VideoNotFound(url.to_string()))
}

/// Build a watch URL pointing at a specific second of a video.
pub fn watch_url(video_id: &str, seconds: f64) -> String {
    format!(
        "https://youtube.com/watch?v={}&t={}s",
        video_id, seconds as u32
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_common_urls() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
            "http://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
        ] {
            assert_eq!(extract_video_id(url).unwrap(), "dQw4w9WgXcQ", "{}", url);
        }
    }

    #[test]
    fn test_extract_accepts_bare_id() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert!(extract_video_id("not-an-id").is_err());
    }

    #[test]
    fn test_extract_rejects_non_video_urls() {
        for url in [
            "https://example.com/video",
            "https://www.youtube.com/playlist?list=PLdQw4w9WgXcQabc",
            "https://www.youtube.com/channel/UCdQw4w9WgXcQ",
            "https://www.youtube.com/user/someuser",
            "https://www.youtube.com/@handle/videos",
            "",
        ] {
            assert!(
                matches!(extract_video_id(url), Err(TekstError::VideoNotFound(_))),
                "{}",
                url
            );
        }
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ", 42.7),
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s"
        );
    }
}
