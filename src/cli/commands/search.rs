//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use crate::video::watch_url;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    query: &str,
    video_id: &str,
    limit: Option<usize>,
    min_score: Option<f64>,
    rerank: bool,
    settings: Settings,
) -> Result<()> {
    let limit = limit.unwrap_or(settings.search.size);
    let min_score = min_score.unwrap_or(settings.search.min_score);

    let pipeline = Pipeline::new(settings)?;
    let index = pipeline.index()?;

    let spinner = Output::spinner(if rerank {
        "Searching and reranking..."
    } else {
        "Searching..."
    });
    let results = if rerank {
        index.rerank_search(video_id, query, limit).await
    } else {
        index.search(video_id, query, limit).await
    };
    spinner.finish_and_clear();

    match results {
        Ok(hits) => {
            let shown: Vec<_> = hits.into_iter().filter(|h| h.score > min_score).collect();

            if shown.is_empty() {
                Output::warning(&format!(
                    "No results with score above {:.1} found for this video.",
                    min_score
                ));
            } else {
                Output::success(&format!("Found {} results", shown.len()));
                for hit in &shown {
                    Output::search_result(
                        hit.score,
                        hit.start_time,
                        &hit.text,
                        &watch_url(video_id, hit.start_time),
                    );
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(anyhow::anyhow!("{}", e));
        }
    }

    Ok(())
}
