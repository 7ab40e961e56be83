//! robots.txt generation.
//!
//! Allows every crawler and points it at the sitemap:
//!
//! ```text
//! User-agent: *
//! Allow: /
//!
//! Sitemap: https://example.com/sitemap.xml
//! ```

use crate::pages::Canonicalizer;
use std::path::Path;

/// Render robots.txt for a sitemap written at `sitemap_path` (root-relative).
pub fn render_robots(canonicalizer: &Canonicalizer, sitemap_path: &Path) -> String {
    let sitemap_path = sitemap_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let sitemap_url = canonicalizer.resolve(&sitemap_path);

    format!("User-agent: *\nAllow: /\n\nSitemap: {sitemap_url}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FlatUrls, PageMode};

    fn canon(origin: &str) -> Canonicalizer {
        Canonicalizer::new(origin, PageMode::Index, FlatUrls::Keep, &[])
    }

    #[test]
    fn test_robots_default_sitemap() {
        let robots = render_robots(&canon("https://www.example.com"), Path::new("sitemap.xml"));
        assert_eq!(
            robots,
            "User-agent: *\nAllow: /\n\nSitemap: https://www.example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn test_robots_nested_sitemap_and_trailing_slash_origin() {
        let robots = render_robots(&canon("https://example.com/"), Path::new("meta/sitemap.xml"));
        assert!(robots.ends_with("Sitemap: https://example.com/meta/sitemap.xml\n"));
    }
}
