// src/links/filter.rs
// =============================================================================
// This module extracts the links worth following from an HTML page.
//
// We use the `scraper` crate to find every <a href="..."> in the page and
// the `url` crate to resolve relative links against the page's own URL.
//
// A link survives when:
// - it has no '#' in it (those only jump around inside a page)
// - its network location contains the page's network location
// - it contains the path filter, if one is set
// - it does not contain the ignore filter, if one is set
//
// The domain check is a substring test, so "example.com" also accepts
// "notexample.com.evil.net". That looseness is what decides the crawl
// scope, so it stays.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts the links to follow from a page
//
// Parameters:
//   base: the URL the page was fetched from
//   html: the page markup
//   path_filter: links must contain this substring (if set)
//   ignore_filter: links containing this substring are dropped (if set)
//
// Returns: absolute URLs in document order, duplicates included
//
// Example:
//   base = "http://example.com/x/y", html = "<a href='/about'>About</a>"
//   result = ["http://example.com/about"]
pub fn extract_links(
    base: &Url,
    html: &str,
    path_filter: Option<&str>,
    ignore_filter: Option<&str>,
) -> Vec<String> {
    let document = Html::parse_document(html);

    // "a[href]" is a constant selector and always parses
    let selector = Selector::parse("a[href]").unwrap();

    let base_location = network_location(base);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_href(base, href.trim()))
        .filter(|link| is_same_site(link, &base_location))
        .filter(|link| path_filter.map_or(true, |path| link.contains(path)))
        .filter(|link| ignore_filter.map_or(true, |ignore| !link.contains(ignore)))
        .collect()
}

// Turns an href into an absolute URL, or None if it should be skipped
//
// hrefs starting with "http" are taken as they are. Everything else is
// joined onto the page URL for its path, then put back together with the
// page's own scheme and network location. The path is decoded again so a
// relative "/my page/" and an absolute "http://example.com/my page/" end
// up as the same string.
//
// Examples:
//   base = "http://example.com/x/y"
//   href = "/about"               -> Some("http://example.com/about")
//   href = "z"                    -> Some("http://example.com/x/z")
//   href = "//cdn.example.com/a/" -> Some("http://example.com/a/")
//   href = "#top"                 -> None
//   href = "mailto:a@b.com"       -> None
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.is_empty() || href.contains('#') {
        return None;
    }

    if href.starts_with("http") {
        return Some(href.to_string());
    }

    let joined = base.join(href).ok()?;
    if !matches!(joined.scheme(), "http" | "https") {
        return None;
    }

    let mut path = urlencoding::decode(joined.path())
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| joined.path().to_string());
    if let Some(query) = joined.query() {
        path.push('?');
        path.push_str(query);
    }

    Some(format!("{}://{}{}", base.scheme(), network_location(base), path))
}

// True when the link's network location contains the base one
//
// Links that do not parse are dropped here without complaint.
fn is_same_site(link: &str, base_location: &str) -> bool {
    match Url::parse(link) {
        Ok(url) => network_location(&url).contains(base_location),
        Err(_) => false,
    }
}

/// The `host[:port]` part of a URL, or an empty string when it has no host.
pub fn network_location(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does filter_map do?
//    - Runs a closure that returns Option<T> on each item
//    - Some(value) is kept, None is dropped
//    - Here it drops anchors without href and hrefs we cannot resolve
//
// 2. What is map_or?
//    - option.map_or(default, f) returns default for None, f(value) for Some
//    - An unset filter returns true, so it lets every link through
//
// 3. Why Url::join?
//    - It resolves a relative href the way a browser does
//    - "../up/" on "http://example.com/x/y" becomes "http://example.com/up/"
// -----------------------------------------------------------------------------
