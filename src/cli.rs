// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// a Rust struct and attributes (the #[...] things).
//
// There are no subcommands: site-mirror does exactly one thing, so every
// option lives on the top-level struct.
// =============================================================================

use clap::Parser;

/// Default substring for dropping printer-friendly duplicates of pages.
pub const DEFAULT_IGNORE: &str = "/print/";

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "Crawl a website breadth-first and save its pages as local HTML files",
    long_about = "site-mirror starts from a seed URL, follows same-domain links breadth-first \
                  and saves every page it discovers into an output directory. With --fix the \
                  saved pages are rewritten to link to each other locally."
)]
pub struct Cli {
    /// URL to crawl (e.g., https://example.com/docs/)
    #[arg(short, long)]
    pub url: String,

    /// Output directory for the saved pages (default: current directory)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Links containing this keyword are ignored
    #[arg(short, long, default_value = DEFAULT_IGNORE)]
    pub ignore: String,

    /// Only links containing this path are crawled
    #[arg(short, long)]
    pub path: Option<String>,

    /// Rewrite links in every saved page to point at the local copies
    #[arg(short, long)]
    pub fix: bool,

    /// URL of a page to save as index.html (always rewritten)
    #[arg(long)]
    pub index: Option<String>,

    /// Number of pages whose links are explored before stopping
    #[arg(short, long, default_value_t = 10)]
    pub max_checks: usize,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the crawl report as JSON when done
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Log level used when RUST_LOG is not set.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["site-mirror", "-u", "http://example.com/"]);
        assert_eq!(cli.url, "http://example.com/");
        assert_eq!(cli.ignore, "/print/");
        assert_eq!(cli.max_checks, 10);
        assert!(cli.output.is_none());
        assert!(cli.path.is_none());
        assert!(!cli.fix);
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from([
            "site-mirror", "-u", "http://example.com/", "-o", "out", "-p", "/blog/", "-i",
            "/tag/", "-f", "--index", "http://example.com/",
        ]);
        assert_eq!(cli.output.as_deref(), Some("out"));
        assert_eq!(cli.path.as_deref(), Some("/blog/"));
        assert_eq!(cli.ignore, "/tag/");
        assert!(cli.fix);
        assert_eq!(cli.index.as_deref(), Some("http://example.com/"));
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["site-mirror"]).is_err());
    }
}
