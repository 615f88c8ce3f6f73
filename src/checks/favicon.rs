// SPDX-License-Identifier: MIT
//! Favicon presence check against the live front page.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;
use tracing::debug;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckStatus};

pub const CHECK_FOR_FAVICON: &str = "checkForFavicon";

pub struct FaviconCheck {
    meta: CheckMeta,
    client: reqwest::Client,
    base_url: String,
    text: Arc<dyn TextService>,
}

impl FaviconCheck {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("9dada888-deb5-468d-b675-997a93cb7d57"),
                "Favicon",
                "Checks whether the site has a favicon.",
                "SEO",
            ),
            client,
            base_url: base_url.into(),
            text,
        }
    }

    async fn check_for_favicon(&self) -> HealthCheckStatus {
        let response = match self.client.get(&self.base_url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "front page fetch failed");
                return HealthCheckStatus::error(self.text.localize("faviconCheck/fetchFailed"));
            }
        };
        if !response.status().is_success() {
            return HealthCheckStatus::error(self.text.localize("faviconCheck/fetchFailed"));
        }
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                debug!(error = %e, "front page body read failed");
                return HealthCheckStatus::error(self.text.localize("faviconCheck/fetchFailed"));
            }
        };

        if markup_mentions_favicon(&body) {
            HealthCheckStatus::success(self.text.localize("faviconCheck/success"))
        } else {
            HealthCheckStatus::error(self.text.localize("faviconCheck/failed"))
        }
    }
}

/// True when the parsed document markup mentions a favicon anywhere —
/// a `<link rel="icon">`, a hard-coded `/favicon.ico` reference, either
/// counts.
fn markup_mentions_favicon(body: &str) -> bool {
    let document = Html::parse_document(body);
    document.root_element().html().to_lowercase().contains("favicon")
}

#[async_trait]
impl HealthCheck for FaviconCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_for_favicon().await])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            CHECK_FOR_FAVICON => Ok(self.check_for_favicon().await),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_link_rel_icon() {
        let html = r#"<html><head><link rel="icon" href="/Favicon.ico"></head><body></body></html>"#;
        assert!(markup_mentions_favicon(html));
    }

    #[test]
    fn plain_page_has_no_favicon() {
        let html = "<html><head><title>t</title></head><body>hello</body></html>";
        assert!(!markup_mentions_favicon(html));
    }
}
