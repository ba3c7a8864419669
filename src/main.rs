// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (RUST_LOG wins over --verbose / --quiet)
// 3. Turn the arguments into a CrawlConfig and prepare the output directory
// 4. Run the crawl and report how it went
// 5. Exit with 0 once a crawl ran (even an aborted one), 2 on setup errors
//
// The runtime is single-threaded: the crawl awaits one request at a time.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod fetch;
mod links;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::CrawlConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let config = CrawlConfig::from_cli(&cli)?;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Could not create {}", config.output_dir.display()))?;

    log::info!("Crawling {}", config.start_url);
    log::info!("Saving pages to {}", config.output_dir.display());
    log::debug!("{:?}", config);

    let client = fetch::build_client(&config)?;
    let report = crawl::crawl_site(&client, &config).await;

    log::info!(
        "{} page(s) explored, {} file(s) saved, {} file(s) rewritten",
        report.pages_explored,
        report.files_saved,
        report.files_rewritten
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(0)
}
