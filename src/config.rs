// SPDX-License-Identifier: MIT
//! Runtime configuration.
//!
//! Loaded from `sitecheck.toml` when present, with every field defaulted so
//! an empty file (or none at all) still yields a usable configuration. CLI
//! flags override individual fields after loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::site::SiteRoot;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SERVER_CONFIG_FILE: &str = "Web.config";
const DEFAULT_SETTINGS_CONFIG_FILE: &str = "config/cmsSettings.config";
const DEFAULT_OPERATOR: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteCheckConfig {
    /// Directory the deployed site lives in.
    pub site_root: PathBuf,
    /// Base URL of the running site, for the live HTTP checks.
    pub base_url: String,
    /// Bound on every outbound request — a single unreachable check must
    /// not stall the whole report.
    pub http_timeout_secs: u64,
    /// Server configuration document, relative to the site root.
    pub server_config_file: String,
    /// CMS settings document, relative to the site root.
    pub settings_config_file: String,
    /// Username destructive remediations are attributed to.
    pub operator: String,
    /// JSON snapshot of CMS entities; enables the CMS-level checks when
    /// sitecheck runs outside the CMS process.
    pub cms_snapshot: Option<PathBuf>,
}

impl Default for SiteCheckConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            server_config_file: DEFAULT_SERVER_CONFIG_FILE.to_string(),
            settings_config_file: DEFAULT_SETTINGS_CONFIG_FILE.to_string(),
            operator: DEFAULT_OPERATOR.to_string(),
            cms_snapshot: None,
        }
    }
}

impl SiteCheckConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("could not parse config file {}", path.display()))
    }

    /// Load from an explicit path, from `sitecheck.toml` in the working
    /// directory, or fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new("sitecheck.toml");
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn site(&self) -> SiteRoot {
        SiteRoot::new(&self.site_root)
    }

    pub fn server_config_path(&self) -> PathBuf {
        self.site().resolve(&self.server_config_file)
    }

    pub fn settings_config_path(&self) -> PathBuf {
        self.site().resolve(&self.settings_config_file)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Shared client for every live-site check, with the configured bound.
    pub fn http_client(&self) -> crate::error::Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.http_timeout())
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: SiteCheckConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.server_config_file, DEFAULT_SERVER_CONFIG_FILE);
        assert!(config.cms_snapshot.is_none());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: SiteCheckConfig = toml::from_str(
            r#"
            site_root = "/srv/site"
            base_url = "https://example.org"
            "#,
        )
        .unwrap();
        assert_eq!(config.site_root, PathBuf::from("/srv/site"));
        assert_eq!(config.base_url, "https://example.org");
        assert_eq!(config.operator, DEFAULT_OPERATOR);
    }

    #[test]
    fn config_paths_resolve_under_site_root() {
        let config = SiteCheckConfig {
            site_root: PathBuf::from("/srv/site"),
            ..Default::default()
        };
        assert_eq!(
            config.server_config_path(),
            PathBuf::from("/srv/site/Web.config")
        );
        assert_eq!(
            config.settings_config_path(),
            PathBuf::from("/srv/site/config/cmsSettings.config")
        );
    }
}
