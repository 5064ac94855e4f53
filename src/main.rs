use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use shelfdive::core::config;
use shelfdive::tui;

#[derive(Parser)]
#[command(name = "shelfdive", about = "Terminal client for the DeepShelf book recommender")]
struct Args {
    /// Base URL of the recommendation API
    #[arg(long)]
    api_url: Option<String>,

    /// Search query to run on startup
    query: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to shelfdive.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let log_level = match std::env::var("LOG_LEVEL").as_deref() {
        Ok("error") => LevelFilter::Error,
        Ok("warn") => LevelFilter::Warn,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    if let Ok(log_file) = File::create("shelfdive.log") {
        let _ = WriteLogger::init(log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}; falling back to defaults");
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        args.api_url.as_deref(),
        args.query.as_deref(),
    );

    log::info!("shelfdive starting up against {}", resolved.api_base_url);

    tui::run(resolved)
}
