// src/links/rewrite.rs
// =============================================================================
// This module points the links of a saved page at the local copies.
//
// We use `lol_html`, a streaming HTML rewriter: it passes the markup through
// unchanged except for the attributes we touch, so the saved page keeps its
// original layout.
//
// Every <a> whose href contains the crawled domain gets its href replaced by
// the file name the saver would derive for that URL. The saver may have
// added a "(1)" suffix to avoid a collision; the rewriter does not know
// about that and always uses the plain derived name.
// =============================================================================

use lol_html::{element, HtmlRewriter, Settings};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::CrawlError;
use crate::fetch::derive_file_name;

// Rewrites the links of one saved file in place
//
// Parameters:
//   domain: anchors whose href contains this string are rewritten
//   output_dir: directory the file was saved in
//   file_name: name returned by the saver
//
// Returns: how many anchors were rewritten
pub async fn rewrite_file(
    domain: &str,
    output_dir: &Path,
    file_name: &str,
) -> Result<usize, CrawlError> {
    let path = output_dir.join(file_name);

    let html = tokio::fs::read(&path).await.map_err(|source| CrawlError::Io {
        path: path.clone(),
        source,
    })?;

    let (rewritten, count) =
        rewrite_links_in_html(&html, domain).map_err(|message| CrawlError::Rewrite {
            path: path.clone(),
            message,
        })?;

    tokio::fs::write(&path, rewritten)
        .await
        .map_err(|source| CrawlError::Io {
            path: path.clone(),
            source,
        })?;

    log::info!("Fixed {} link(s) in {}", count, file_name);
    Ok(count)
}

// Core rewriting, separated from the file I/O so it can be tested directly
//
// Returns: (rewritten markup, number of anchors changed) or an error message
fn rewrite_links_in_html(html: &[u8], domain: &str) -> Result<(Vec<u8>, usize), String> {
    let mut output = Vec::with_capacity(html.len());
    let rewrite_count = AtomicUsize::new(0);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("a[href]", |el| {
                if let Some(href) = el.get_attribute("href") {
                    if href.contains(domain) {
                        el.set_attribute("href", &derive_file_name(&href))?;
                        rewrite_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter
        .write(html)
        .map_err(|e| format!("HTML rewrite error: {}", e))?;
    rewriter
        .end()
        .map_err(|e| format!("HTML rewrite finalization error: {}", e))?;

    Ok((output, rewrite_count.load(Ordering::Relaxed)))
}
