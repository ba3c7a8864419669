// src/links/mod.rs
// =============================================================================
// Everything that looks at the <a> tags of a page.
//
// Submodules:
// - filter: picks the links worth crawling out of a fetched page
// - rewrite: points the links of a saved page at the local copies
// =============================================================================

mod filter;
mod rewrite;

pub use filter::{extract_links, network_location};
pub use rewrite::rewrite_file;
