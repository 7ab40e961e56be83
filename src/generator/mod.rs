//! Artifact generators.
//!
//! Each generator renders into memory from the page registry and site
//! configuration; the build pipeline writes the results.
//!
//! | Artifact       | Generator  |
//! |----------------|------------|
//! | `sitemap.xml`  | `sitemap`  |
//! | `dataset.json` | `manifest` |
//! | `robots.txt`   | `robots`   |

pub mod manifest;
pub mod robots;
pub mod sitemap;

pub use manifest::{Drift, ManifestError, check_drift, render_manifest};
pub use robots::render_robots;
pub use sitemap::render_sitemap;
