// src/config.rs
// =============================================================================
// The crawl configuration.
//
// Built once from the parsed command line and never changed afterwards.
// Each component receives a `&CrawlConfig` instead of reading globals.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URL, the first entry of the frontier
    pub start_url: String,
    /// Directory the pages are written to
    pub output_dir: PathBuf,
    /// Links must contain this substring to be kept
    pub path_filter: Option<String>,
    /// Links containing this substring are dropped
    pub ignore_filter: Option<String>,
    /// Rewrite every saved page, not just the index
    pub fix_links: bool,
    /// Page saved as index.html before the crawl starts
    pub index_url: Option<String>,
    /// How many pages are dequeued and explored at most
    pub max_checks: usize,
    /// Per-request timeout
    pub timeout: Duration,
}

impl CrawlConfig {
    /// A config with the CLI defaults, writing into `output_dir`.
    pub fn new(start_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_url: start_url.into(),
            output_dir: output_dir.into(),
            path_filter: None,
            ignore_filter: Some(crate::cli::DEFAULT_IGNORE.to_string()),
            fix_links: false,
            index_url: None,
            max_checks: 10,
            timeout: Duration::from_secs(30),
        }
    }

    // Validates the command line and turns it into a config
    //
    // The seed URL must parse and carry a host, otherwise there is no
    // network location to compare links against.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let start = Url::parse(&cli.url)
            .map_err(|e| anyhow!("Invalid URL '{}': {}", cli.url, e))?;
        if start.host_str().is_none() {
            return Err(anyhow!("URL has no host: {}", cli.url));
        }

        if let Some(index) = &cli.index {
            Url::parse(index).map_err(|e| anyhow!("Invalid index URL '{}': {}", index, e))?;
        }

        let output_dir = match &cli.output {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().context("Could not read the current directory")?,
        };

        Ok(Self {
            path_filter: non_empty(cli.path.as_deref()),
            ignore_filter: non_empty(Some(&cli.ignore)),
            fix_links: cli.fix,
            index_url: cli.index.clone(),
            max_checks: cli.max_checks,
            timeout: Duration::from_secs(cli.timeout),
            ..Self::new(cli.url.clone(), output_dir)
        })
    }
}

// An empty filter would match (or reject) every link, so treat it as unset.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
