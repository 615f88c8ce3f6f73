// SPDX-License-Identifier: MIT
//! XML site map check against the live site.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckStatus};

pub const CHECK_FOR_SITE_MAP: &str = "checkForSiteMap";

const SITEMAP_PATH: &str = "/sitemap";

pub struct SiteMapCheck {
    meta: CheckMeta,
    client: reqwest::Client,
    base_url: String,
    text: Arc<dyn TextService>,
}

impl SiteMapCheck {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("d324894f-4480-4019-8750-13192b50f88f"),
                "Site Map",
                "Checks that an XML site map exists at '/sitemap'.",
                "Site Map",
            ),
            client,
            base_url: base_url.into(),
            text,
        }
    }

    async fn check_for_site_map(&self) -> HealthCheckStatus {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), SITEMAP_PATH);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "site map fetch failed");
                return HealthCheckStatus::error(self.text.localize("sitemapCheck/failed"));
            }
        };

        if !response.status().is_success() {
            return HealthCheckStatus::error(self.text.localize("sitemapCheck/failed"));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if content_type.contains("xml") {
            HealthCheckStatus::success(self.text.localize("sitemapCheck/success"))
        } else {
            HealthCheckStatus::error(self.text.localize("sitemapCheck/notXml"))
        }
    }
}

#[async_trait]
impl HealthCheck for SiteMapCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_for_site_map().await])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            CHECK_FOR_SITE_MAP => Ok(self.check_for_site_map().await),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
