//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the list command: show all indexed videos with their titles.
pub async fn run_list(settings: Settings) -> Result<()> {
    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching indexed videos...");
    let videos = pipeline.list_videos().await;
    spinner.finish_and_clear();

    match videos {
        Ok(videos) => {
            if videos.is_empty() {
                Output::warning("No videos found.");
            } else {
                Output::header("Indexed videos");
                for (id, title) in &videos {
                    Output::video_entry(title, id);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to list videos: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
