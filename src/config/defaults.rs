//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn exclude_dirs() -> Vec<String> {
        [".git", ".github", "node_modules", "scripts"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn exclude_files() -> Vec<String> {
        vec!["404.html".into()]
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }

    pub mod robots {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "robots.txt".into()
        }
    }
}

// ============================================================================
// [manifest] Section Defaults
// ============================================================================

pub mod manifest {
    use std::path::PathBuf;

    pub fn id() -> String {
        "SITE_PAGES_001".into()
    }

    pub fn title() -> String {
        "Site Pages Index".into()
    }

    pub fn version() -> String {
        "1.0.0".into()
    }

    pub fn fallback() -> PathBuf {
        "index.html".into()
    }

    pub fn license() -> String {
        "/license/".into()
    }

    pub fn machine_license() -> String {
        "/LICENSE.txt".into()
    }

    pub fn pricing() -> String {
        "/pricing/".into()
    }

    pub fn contact() -> String {
        "/contact/".into()
    }
}
