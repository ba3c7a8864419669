// src/error.rs
// =============================================================================
// Fatal crawl errors.
//
// Only the save path and file I/O produce these. The exploratory fetch in
// fetch/page.rs never returns an error: it logs and yields no links.
// =============================================================================

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// The server answered the save request with a non-success status
    #[error("HTTP {status} while saving {url}")]
    Status { url: String, status: StatusCode },

    /// The save request never got a response (DNS, connect, timeout, ...)
    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not rewrite links in {}: {message}", .path.display())]
    Rewrite { path: PathBuf, message: String },
}

impl CrawlError {
    /// Short label for the "Fatal: ... Encountered" line.
    pub fn label(&self) -> String {
        match self {
            CrawlError::Status { status, .. } => status.as_u16().to_string(),
            CrawlError::Transport { source, .. } => match source.status() {
                Some(status) => status.as_u16().to_string(),
                None if source.is_timeout() => "Timeout".to_string(),
                None => "Connection Error".to_string(),
            },
            CrawlError::Io { .. } => "I/O Error".to_string(),
            CrawlError::Rewrite { .. } => "Rewrite Error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label() {
        let err = CrawlError::Status {
            url: "http://example.com/missing/".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.label(), "404");
        assert_eq!(
            err.to_string(),
            "HTTP 404 Not Found while saving http://example.com/missing/"
        );
    }

    #[test]
    fn test_server_error_label() {
        let err = CrawlError::Status {
            url: "http://example.com/broken/".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.label(), "500");
    }

    #[test]
    fn test_io_label() {
        let err = CrawlError::Io {
            path: PathBuf::from("out/page.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.label(), "I/O Error");
        assert!(err.to_string().contains("out/page.html"));
    }
}
