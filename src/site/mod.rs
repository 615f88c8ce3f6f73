// SPDX-License-Identifier: MIT
//! Site root path mapping.
//!
//! Checks address files by virtual path (`~/robots.txt`, `~/500.html`);
//! [`SiteRoot`] resolves those against the configured deployment directory.

pub mod configdoc;

use std::path::{Path, PathBuf};

use crate::error::{HealthCheckError, Result};

#[derive(Debug, Clone)]
pub struct SiteRoot {
    root: PathBuf,
}

impl SiteRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a `~/`-prefixed virtual path onto the site directory.
    /// Plain relative paths resolve the same way.
    pub fn resolve(&self, virtual_path: &str) -> PathBuf {
        let rel = virtual_path
            .trim_start_matches("~/")
            .trim_start_matches('/');
        self.root.join(rel)
    }

    pub fn exists(&self, virtual_path: &str) -> bool {
        self.resolve(virtual_path).exists()
    }

    /// Write `contents` to a virtual path, creating parent directories.
    /// Overwrites whatever is there, so re-running a fix leaves the same
    /// bytes behind.
    pub fn write(&self, virtual_path: &str, contents: &str) -> Result<()> {
        let path = self.resolve(virtual_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| HealthCheckError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, contents).map_err(|source| HealthCheckError::Write { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_strips_virtual_prefix() {
        let site = SiteRoot::new("/srv/site");
        assert_eq!(
            site.resolve("~/config/app.config"),
            PathBuf::from("/srv/site/config/app.config")
        );
        assert_eq!(site.resolve("robots.txt"), PathBuf::from("/srv/site/robots.txt"));
    }

    #[test]
    fn write_creates_parents_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let site = SiteRoot::new(tmp.path());

        site.write("~/config/deep/file.txt", "one").unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("config/deep/file.txt")).unwrap(),
            "one"
        );

        site.write("~/config/deep/file.txt", "two").unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("config/deep/file.txt")).unwrap(),
            "two"
        );
    }
}
