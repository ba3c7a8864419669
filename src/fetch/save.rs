// src/fetch/save.rs
// =============================================================================
// This module downloads a page and writes it to the output directory.
//
// Unlike the exploratory fetch, nothing is forgiven here: a failed request
// or an error status is returned as a CrawlError and ends the crawl.
//
// File names come from the URL: "http://example.com/blog/post2/" is saved
// as "post2.html". When that name is already taken somewhere under the
// output directory, a counter is added: "post2(1).html", "post2(2).html".
// =============================================================================

use reqwest::Client;
use std::path::Path;

use crate::error::CrawlError;

// Downloads a page and saves its raw bytes
//
// Parameters:
//   client: shared HTTP client
//   url: page to download
//   output_dir: directory to write into
//   explicit_name: use this file name as-is instead of deriving one
//
// Returns: the file name the page was written under
pub async fn save_page(
    client: &Client,
    url: &str,
    output_dir: &Path,
    explicit_name: Option<&str>,
) -> Result<String, CrawlError> {
    let transport = |source: reqwest::Error| CrawlError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().await.map_err(transport)?;

    let file_name = match explicit_name {
        Some(name) => name.to_string(),
        None => available_name(output_dir, &derive_file_name(url)),
    };

    let path = output_dir.join(&file_name);
    tokio::fs::write(&path, &body)
        .await
        .map_err(|source| CrawlError::Io {
            path: path.clone(),
            source,
        })?;

    log::debug!("Wrote {} byte(s) from {} to {}", body.len(), url, file_name);
    Ok(file_name)
}

/// File name for a URL: its second-to-last path segment plus ".html".
///
/// Spaces (raw or percent-encoded) become underscores.
pub fn derive_file_name(url: &str) -> String {
    // rsplit yields the last segment first, so nth(1) is the one before it
    let segment = url.rsplit('/').nth(1).unwrap_or(url);
    format!("{}.html", segment.replace("%20", "_").replace(' ', "_"))
}

// Picks a name that does not clash with pages already on disk
//
// The whole output tree is walked (serially) and every "stem.html" or
// "stem(N).html" is counted. With k matches the new page becomes
// "stem(k).html".
fn available_name(output_dir: &Path, name: &str) -> String {
    let stem = name.strip_suffix(".html").unwrap_or(name);

    let taken = jwalk::WalkDir::new(output_dir)
        .parallelism(jwalk::Parallelism::Serial)
        .skip_hidden(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map_or(false, |file| is_variant_of(file, stem))
        })
        .count();

    if taken == 0 {
        name.to_string()
    } else {
        format!("{}({}).html", stem, taken)
    }
}

// "page.html", "page(1).html", "page(12).html" are all variants of "page"
fn is_variant_of(file: &str, stem: &str) -> bool {
    let Some(rest) = file.strip_prefix(stem) else {
        return false;
    };
    if rest == ".html" {
        return true;
    }
    rest.strip_prefix('(')
        .and_then(|r| r.strip_suffix(").html"))
        .map_or(false, |n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    #[test]
    fn test_derive_file_name() {
        assert_eq!(derive_file_name("http://example.com/blog/post2/"), "post2.html");
        assert_eq!(derive_file_name("http://example.com/blog/post1"), "blog.html");
        assert_eq!(derive_file_name("http://example.com/my page/"), "my_page.html");
        assert_eq!(derive_file_name("http://example.com/my%20page/"), "my_page.html");
        assert_eq!(derive_file_name("http://example.com/"), "example.com.html");
    }

    #[test]
    fn test_is_variant_of() {
        assert!(is_variant_of("page.html", "page"));
        assert!(is_variant_of("page(1).html", "page"));
        assert!(is_variant_of("page(12).html", "page"));
        assert!(!is_variant_of("pages.html", "page"));
        assert!(!is_variant_of("page().html", "page"));
        assert!(!is_variant_of("page(a).html", "page"));
    }

    #[test]
    fn test_available_name_counts_tree() {
        let dir = TempDir::new().unwrap();
        assert_eq!(available_name(dir.path(), "page.html"), "page.html");

        std::fs::write(dir.path().join("page.html"), "a").unwrap();
        assert_eq!(available_name(dir.path(), "page.html"), "page(1).html");

        std::fs::create_dir(dir.path().join("old")).unwrap();
        std::fs::write(dir.path().join("old").join("page(1).html"), "b").unwrap();
        assert_eq!(available_name(dir.path(), "page.html"), "page(2).html");
    }

    #[tokio::test]
    async fn test_collision_gets_suffix() {
        let mut server = Server::new_async().await;
        let _a = server
            .mock("GET", "/a/page/")
            .with_status(200)
            .with_body("first")
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b/page/")
            .with_status(200)
            .with_body("second")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = Client::new();

        let first = save_page(&client, &format!("{}/a/page/", server.url()), dir.path(), None)
            .await
            .unwrap();
        let second = save_page(&client, &format!("{}/b/page/", server.url()), dir.path(), None)
            .await
            .unwrap();

        assert_eq!(first, "page.html");
        assert_eq!(second, "page(1).html");
        assert_eq!(std::fs::read_to_string(dir.path().join("page.html")).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(dir.path().join("page(1).html")).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_explicit_name_overwrites() {
        let mut server = Server::new_async().await;
        let _home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("fresh")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "stale").unwrap();

        let client = Client::new();
        let name = save_page(&client, &format!("{}/", server.url()), dir.path(), Some("index.html"))
            .await
            .unwrap();

        assert_eq!(name, "index.html");
        assert_eq!(std::fs::read_to_string(dir.path().join("index.html")).unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_error_status_is_fatal() {
        let mut server = Server::new_async().await;
        let _missing = server
            .mock("GET", "/missing/")
            .with_status(404)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = Client::new();
        let result = save_page(&client, &format!("{}/missing/", server.url()), dir.path(), None).await;

        match result {
            Err(err @ CrawlError::Status { .. }) => assert_eq!(err.label(), "404"),
            other => panic!("expected a status error, got {:?}", other),
        }
        assert!(!dir.path().join("missing.html").exists());
    }

    #[tokio::test]
    async fn test_connection_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let client = Client::new();
        let result = save_page(&client, "http://127.0.0.1:9/nothing/", dir.path(), None).await;

        match result {
            Err(err @ CrawlError::Transport { .. }) => {
                assert_eq!(err.label(), "Connection Error")
            }
            other => panic!("expected a transport error, got {:?}", other),
        }
        assert!(!dir.path().join("nothing.html").exists());
    }
}
