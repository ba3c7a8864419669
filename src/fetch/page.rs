// src/fetch/page.rs
// =============================================================================
// The exploratory fetch: download a page and pull out the links to follow.
//
// Nothing on this path stops the crawl. A bad status, a non-HTML response
// or a failed request is logged and the page simply yields no links.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::config::CrawlConfig;
use crate::links::extract_links;

// Fetches a page and returns the links the filter keeps
//
// Parameters:
//   client: shared HTTP client
//   url: page to fetch
//   config: supplies the path and ignore filters
//
// Returns: absolute URLs in document order (empty on any failure)
pub async fn fetch_links(client: &Client, url: &str, config: &CrawlConfig) -> Vec<String> {
    let base = match Url::parse(url) {
        Ok(base) => base,
        Err(e) => {
            log::warn!("{} : {}", url, e);
            return Vec::new();
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("{} : {}", url, e);
            return Vec::new();
        }
    };

    let status = response.status();
    if !status.is_success() {
        log::warn!("{} : {}", url, status.as_u16());
        return Vec::new();
    }

    // A missing Content-Type counts as "not HTML"
    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.contains("html"));
    if !is_html {
        log::warn!("{} is not an html document.", url);
        return Vec::new();
    }

    let html = match response.text().await {
        Ok(html) => html,
        Err(e) => {
            log::warn!("{} : {}", url, e);
            return Vec::new();
        }
    };

    let links = extract_links(
        &base,
        &html,
        config.path_filter.as_deref(),
        config.ignore_filter.as_deref(),
    );
    log::debug!("{} link(s) kept on {}", links.len(), url);
    links
}
