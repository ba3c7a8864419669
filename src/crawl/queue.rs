// src/crawl/queue.rs
// =============================================================================
// This module runs the crawl itself, breadth-first.
//
// How it works:
// 1. If an index page is configured, save it as index.html and fix its links
// 2. Start with the seed URL in a queue (the frontier)
// 3. Pop the head of the queue and collect its links
// 4. Every link not seen before is queued, saved, and (with --fix) rewritten
// 5. Repeat until the queue is empty or `max_checks` pages were explored
//
// The counter goes down once per page taken off the queue, not per file
// saved, so a single page with many links can produce many files.
//
// Everything runs one step at a time: each request is awaited before the
// next one starts. A CrawlError from saving or rewriting stops the crawl.
// =============================================================================

use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use url::Url;

use super::{CrawlOutcome, CrawlReport};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::fetch::{fetch_links, save_page};
use crate::links::{network_location, rewrite_file};

// Counters updated while the crawl runs; they survive an abort.
#[derive(Debug, Default)]
struct Progress {
    pages_explored: usize,
    files_saved: usize,
    files_rewritten: usize,
}

// Crawls a website starting from `config.start_url`
//
// Parameters:
//   client: HTTP client shared by every request
//   config: the crawl configuration
//
// Returns: a report of what happened; a fatal error is part of the report
// rather than an Err, because the run still ends normally
pub async fn crawl_site(client: &Client, config: &CrawlConfig) -> CrawlReport {
    let started = Instant::now();

    // Links containing this are rewritten to local names
    let domain = Url::parse(&config.start_url)
        .map(|url| network_location(&url))
        .unwrap_or_else(|_| config.start_url.clone());

    let mut progress = Progress::default();
    let result = run(client, config, &domain, &mut progress).await;

    let (outcome, error) = match result {
        Ok(()) => (CrawlOutcome::Completed, None),
        Err(e) => {
            log::error!("Fatal: {} Encountered...", e.label());
            log::debug!("{}", e);
            (CrawlOutcome::Aborted, Some(e.to_string()))
        }
    };

    let elapsed = started.elapsed();
    let (minutes, seconds) = split_elapsed(elapsed);
    log::info!("Completed after {} minutes, {:.2} seconds.", minutes, seconds);

    CrawlReport {
        outcome,
        pages_explored: progress.pages_explored,
        files_saved: progress.files_saved,
        files_rewritten: progress.files_rewritten,
        elapsed_secs: elapsed.as_secs_f64(),
        error,
    }
}

async fn run(
    client: &Client,
    config: &CrawlConfig,
    domain: &str,
    progress: &mut Progress,
) -> Result<(), CrawlError> {
    let mut visited = HashSet::new();

    if let Some(index_url) = &config.index_url {
        log::info!("Saving index page : {}", index_url);
        let name = save_page(client, index_url, &config.output_dir, Some("index.html")).await?;
        progress.files_saved += 1;
        rewrite_file(domain, &config.output_dir, &name).await?;
        progress.files_rewritten += 1;
        // Already on disk as index.html
        visited.insert(index_url.clone());
    }

    let mut frontier = VecDeque::from([config.start_url.clone()]);
    let mut remaining = config.max_checks;

    while remaining > 0 {
        let Some(page) = frontier.pop_front() else {
            break;
        };

        let links = fetch_links(client, &page, config).await;
        visited.insert(page);

        for link in links {
            // insert() is false when the link was already seen
            if !visited.insert(link.clone()) {
                continue;
            }
            frontier.push_back(link.clone());
            log::info!("Saving Page {:>3} : {}", frontier.len(), link);

            let name = save_page(client, &link, &config.output_dir, None).await?;
            progress.files_saved += 1;

            if config.fix_links {
                rewrite_file(domain, &config.output_dir, &name).await?;
                progress.files_rewritten += 1;
            }
        }

        progress.pages_explored += 1;
        remaining -= 1;
    }

    Ok(())
}

// Whole minutes plus the seconds left over
fn split_elapsed(elapsed: Duration) -> (u64, f64) {
    let total = elapsed.as_secs_f64();
    let minutes = elapsed.as_secs() / 60;
    (minutes, total - (minutes * 60) as f64)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does let-else do?
//    - let Some(page) = frontier.pop_front() else { break };
//    - Binds `page` if the pattern matches, otherwise runs the else block
//    - The else block must leave the scope (break, return, continue, panic)
//
// 2. Why does HashSet::insert return a bool?
//    - true means the value was new, false means it was already there
//    - That lets us check and mark a link as visited in one call
//
// 3. Why is `run` separate from `crawl_site`?
//    - `run` uses the ? operator to stop at the first CrawlError
//    - `crawl_site` catches that error and still produces a report
//    - Progress is passed as &mut so the counts survive the early return
// -----------------------------------------------------------------------------
