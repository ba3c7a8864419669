// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL
// - Keeps to the seed's domain (loosely, see links/filter.rs)
// - Bounded by the number of pages explored
// - Saves every discovered page and optionally fixes its links
//
// The result of a run is a CrawlReport, which main prints as JSON on request.
// =============================================================================

mod queue;

use serde::Serialize;

pub use queue::crawl_site;

/// How a crawl run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// The frontier ran dry or the page ceiling was reached
    Completed,
    /// A fatal error stopped the run early
    Aborted,
}

/// Summary of a crawl run.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub outcome: CrawlOutcome,
    /// Pages taken off the frontier and searched for links
    pub pages_explored: usize,
    /// Files written, index.html included
    pub files_saved: usize,
    /// Files passed through the link rewriter
    pub files_rewritten: usize,
    pub elapsed_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json() {
        let report = CrawlReport {
            outcome: CrawlOutcome::Aborted,
            pages_explored: 3,
            files_saved: 7,
            files_rewritten: 0,
            elapsed_secs: 1.5,
            error: Some("HTTP 404 Not Found while saving http://example.com/x/".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "aborted");
        assert_eq!(json["files_saved"], 7);
        assert!(json["error"].as_str().unwrap().contains("404"));
    }

    #[test]
    fn test_report_json_skips_missing_error() {
        let report = CrawlReport {
            outcome: CrawlOutcome::Completed,
            pages_explored: 1,
            files_saved: 0,
            files_rewritten: 0,
            elapsed_secs: 0.2,
            error: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "completed");
        assert!(json.get("error").is_none());
    }
}
