// SPDX-License-Identifier: MIT
//! `lang` attribute check against the live front page.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;
use tracing::debug;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckStatus};

pub const CHECK_FOR_HTML_LANGUAGE_ATTRIBUTE: &str = "checkForHtmlLanguageAttribute";

pub struct HtmlLanguageAttributeCheck {
    meta: CheckMeta,
    client: reqwest::Client,
    base_url: String,
    text: Arc<dyn TextService>,
}

impl HtmlLanguageAttributeCheck {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("80c42a0e-62a8-4c10-a8a9-5ce4d5938de6"),
                "HTML Language Attribute",
                "Checks that the <html> tag has the language attribute set.",
                "HTML",
            ),
            client,
            base_url: base_url.into(),
            text,
        }
    }

    async fn check_for_html_language_attribute(&self) -> HealthCheckStatus {
        let body = match self.fetch_front_page().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "front page fetch failed");
                return HealthCheckStatus::error(self.text.localize("htmlLangCheck/fetchFailed"));
            }
        };

        match html_lang_attribute(&body) {
            Some(lang) => HealthCheckStatus::success(format!(
                "{}\"{}\"",
                self.text.localize("htmlLangCheck/success"),
                lang
            )),
            None => HealthCheckStatus::error(self.text.localize("htmlLangCheck/failed")),
        }
    }

    async fn fetch_front_page(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

/// The `lang` attribute of the document element, if declared.
fn html_lang_attribute(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    document
        .root_element()
        .value()
        .attr("lang")
        .map(|lang| lang.to_string())
}

#[async_trait]
impl HealthCheck for HtmlLanguageAttributeCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_for_html_language_attribute().await])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            CHECK_FOR_HTML_LANGUAGE_ATTRIBUTE => {
                Ok(self.check_for_html_language_attribute().await)
            }
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
    fn reads_lang_from_document_element() {
        let html = r#"<html lang="en-GB"><head></head><body></body></html>"#;
        assert_eq!(html_lang_attribute(html).as_deref(), Some("en-GB"));
    }

    #[test]
    fn missing_lang_is_none() {
        let html = "<html><head></head><body></body></html>";
        assert_eq!(html_lang_attribute(html), None);
    }
}
