//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Run the init command: check prerequisites, create directories and a
/// default configuration file.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Tekst Setup");
    println!();

    // Step 1: Prerequisites
    println!("{}", style("Step 1: Checking prerequisites").bold().cyan());
    println!();

    if std::process::Command::new("yt-dlp")
        .arg("--version")
        .output()
        .is_err()
    {
        Output::warning("yt-dlp not found. Install it and ensure it's in your PATH:");
        println!("  {}", style("pip install yt-dlp").green());
    } else {
        Output::success("yt-dlp is installed!");
    }

    println!();

    // Step 2: Elasticsearch configuration
    println!(
        "{}",
        style("Step 2: Checking Elasticsearch configuration")
            .bold()
            .cyan()
    );
    println!();

    let endpoint_configured = settings.elasticsearch.endpoint.is_some()
        || std::env::var("ELASTIC_ENDPOINT").is_ok();
    if endpoint_configured {
        Output::success("Elasticsearch endpoint is configured!");
    } else {
        Output::warning("No Elasticsearch endpoint configured.");
        println!("  Chunking works without it; indexing and search need it.");
        println!("  Set it in your shell configuration or a .env file:");
        println!("  {}", style("export ELASTIC_ENDPOINT='https://...'").green());
        println!("  {}", style("export ELASTIC_API_KEY='...'").green());
    }

    println!();

    // Step 3: Directories
    println!("{}", style("Step 3: Setting up directories").bold().cyan());
    println!();

    let chunks_dir = settings.chunks_dir();
    if chunks_dir.exists() {
        Output::info(&format!("Chunks directory exists: {}", chunks_dir.display()));
    } else {
        std::fs::create_dir_all(&chunks_dir)?;
        Output::success(&format!("Created chunks directory: {}", chunks_dir.display()));
    }

    println!();

    // Step 4: Config file
    println!("{}", style("Step 4: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    }

    println!();
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!(
        "  {} Chunk and index a video",
        style("tekst ingest <url>").cyan()
    );
    println!(
        "  {} Search within it",
        style("tekst search \"<query>\" --video <id>").cyan()
    );
    println!("  {} See all indexed videos", style("tekst list").cyan());

    Ok(())
}
