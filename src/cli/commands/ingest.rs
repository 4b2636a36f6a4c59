//! Ingest command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the ingest command: chunk a video's subtitles and index them.
pub async fn run_ingest(url: &str, settings: Settings) -> Result<()> {
    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching and chunking subtitles...");
    let result = pipeline.process_url(url, true).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) => {
            if result.chunks_written == 0 {
                Output::warning(&format!(
                    "No chunks produced for video {} (empty transcript).",
                    result.video_id
                ));
                return Ok(());
            }

            Output::success(&format!(
                "Indexed {} chunks for video {}",
                result.chunks_ingested, result.video_id
            ));
            if let Some(title) = &result.title {
                Output::kv("Title", title);
            }
            if let Some(path) = &result.chunk_file {
                Output::kv("File", &path.display().to_string());
            }
        }
        Err(e) => {
            Output::error(&format!("Ingestion failed: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
