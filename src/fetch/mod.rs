// src/fetch/mod.rs
// =============================================================================
// This module talks to the website.
//
// Submodules:
// - page: fetches a page and returns the links worth following (soft errors)
// - save: downloads a page to disk (errors end the crawl)
//
// Both share one reqwest Client, built here from the crawl config.
// =============================================================================

mod page;
mod save;

use anyhow::Result;
use reqwest::Client;

use crate::config::CrawlConfig;

pub use page::fetch_links;
pub use save::{derive_file_name, save_page};

// Creates the HTTP client used for the whole run
//
// One client means one connection pool, reused for every request.
pub fn build_client(config: &CrawlConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(concat!("site-mirror/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
