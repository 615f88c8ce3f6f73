// SPDX-License-Identifier: MIT
//! 404 response check against the live site.
//!
//! Deliberately requests a path that cannot exist and inspects the error
//! response: the check passes when the body does *not* contain the default
//! placeholder marker, i.e. the deployment serves its own 404 page. A probe
//! path that answers 2xx also fails — that means unknown paths are not
//! producing a 404 at all.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckStatus};

pub const CHECK_ERROR_404_RESPONSE: &str = "checkError404Response";

/// Random GUID segment — no real route will ever match it.
const PROBE_PATH: &str = "/ddbddcaa-5c3c-4ab7-afae-f9eea9008ff9";

/// Marker text carried by the stock placeholder page.
const DEFAULT_404_MARKER: &str = "This page can be replaced with a custom 404.";

pub struct Error404ResponseCheck {
    meta: CheckMeta,
    client: reqwest::Client,
    base_url: String,
    text: Arc<dyn TextService>,
}

impl Error404ResponseCheck {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("4ce5211a-942e-4925-a1be-cc8f04e0e327"),
                "404 Error Response",
                "Check that a custom page is returned in the event of a 404 error.",
                "Errors",
            ),
            client,
            base_url: base_url.into(),
            text,
        }
    }

    async fn check_error_404_response(&self) -> HealthCheckStatus {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), PROBE_PATH);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "404 probe failed");
                return HealthCheckStatus::error(
                    self.text.localize("error404ResponseCheck/fetchFailed"),
                );
            }
        };

        if response.status().is_success() {
            return HealthCheckStatus::error(
                self.text.localize("error404ResponseCheck/unexpected2xx"),
            );
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                debug!(error = %e, "404 probe body read failed");
                return HealthCheckStatus::error(
                    self.text.localize("error404ResponseCheck/fetchFailed"),
                );
            }
        };

        if body.contains(DEFAULT_404_MARKER) {
            HealthCheckStatus::error(self.text.localize("error404ResponseCheck/failed"))
        } else {
            HealthCheckStatus::success(self.text.localize("error404ResponseCheck/success"))
        }
    }
}

#[async_trait]
impl HealthCheck for Error404ResponseCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_error_404_response().await])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            CHECK_ERROR_404_RESPONSE => Ok(self.check_error_404_response().await),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
