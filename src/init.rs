//! Starter configuration.
//!
//! `pagemap init` writes a `pagemap.toml` holding every default plus a
//! placeholder origin and a one-entry curated page list to edit.

use crate::config::{PageDescriptor, SiteConfig};
use anyhow::{Context, Result, bail};
use std::fs;

/// Placeholder origin written into new configs
const PLACEHOLDER_URL: &str = "https://www.example.com";

/// Write a starter config to `config.config_path`.
pub fn new_config(config: &SiteConfig) -> Result<()> {
    let path = &config.config_path;
    if path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            path.display()
        );
    }

    let root = config.get_root();
    if !root.is_dir() {
        bail!("Site root `{}` is not a directory", root.display());
    }

    fs::write(path, starter_config()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    crate::log!("init"; "wrote {}", path.display());
    Ok(())
}

/// Serialized starter configuration.
fn starter_config() -> Result<String> {
    let mut starter = SiteConfig::default();
    starter.base.url = Some(PLACEHOLDER_URL.into());
    starter.manifest.notes = vec![
        "Access, crawling and indexing are permitted under the site license.".into(),
        "Commercial use requires a separate commercial license.".into(),
    ];
    starter.manifest.pages = vec![PageDescriptor {
        path: "/".into(),
        url: None,
        kind: "home".into(),
        notes: "Primary entry point.".into(),
    }];

    toml::to_string_pretty(&starter).context("Failed to serialize starter config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DriftCheck, PageMode};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(dir.path());
        config.config_path = dir.path().join("pagemap.toml");
        config
    }

    #[test]
    fn test_new_config_round_trips() {
        let dir = TempDir::new().unwrap();
        new_config(&config_in(&dir)).unwrap();

        let loaded = SiteConfig::from_path(&dir.path().join("pagemap.toml")).unwrap();
        assert_eq!(loaded.base.url.as_deref(), Some(PLACEHOLDER_URL));
        assert_eq!(loaded.build.mode, PageMode::Index);
        assert_eq!(loaded.manifest.check, DriftCheck::Warn);
        assert_eq!(loaded.manifest.pages.len(), 1);
        assert_eq!(loaded.manifest.pages[0].kind, "home");
        assert!(loaded.build.root.is_none());
        loaded.validate().unwrap();
    }

    #[test]
    fn test_new_config_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pagemap.toml"), "# mine\n").unwrap();

        let err = new_config(&config_in(&dir)).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            fs::read_to_string(dir.path().join("pagemap.toml")).unwrap(),
            "# mine\n"
        );
    }

    #[test]
    fn test_new_config_requires_root_directory() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.set_root(&dir.path().join("missing"));
        config.config_path = dir.path().join("missing/pagemap.toml");

        assert!(new_config(&config).is_err());
    }
}
