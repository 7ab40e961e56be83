//! `[base]` section configuration.
//!
//! Holds the public origin every canonical URL is built from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in pagemap.toml - site identity.
///
/// # Example
/// ```toml
/// [base]
/// url = "https://www.example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site origin for canonical URLs in sitemap, manifest and robots.txt.
    /// A trailing slash is ignored.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,
}

impl BaseConfig {
    /// Origin without trailing slashes, empty if unset.
    pub fn origin(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }
}
