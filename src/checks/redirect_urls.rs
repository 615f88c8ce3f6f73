// SPDX-License-Identifier: MIT
//! Redirect URL management check.
//!
//! Stale tracked redirects are an advisory finding, not a failure — the
//! result kind is `Info` so the report flags them without going red.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckStatus};
use crate::services::RedirectUrlService;

pub const CHECK_REDIRECT_URL_MANAGEMENT: &str = "checkRedirectUrlManagement";

pub struct RedirectUrlManagementCheck {
    meta: CheckMeta,
    redirects: Arc<dyn RedirectUrlService>,
    text: Arc<dyn TextService>,
}

impl RedirectUrlManagementCheck {
    pub fn new(redirects: Arc<dyn RedirectUrlService>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("f2e8c97d-b1bb-4984-95ed-6590604aa615"),
                "Redirect URL Management",
                "Checks that all unused links are removed from redirect URL management.",
                "Redirect URL Management",
            ),
            redirects,
            text,
        }
    }

    fn check_redirect_url_management(&self) -> HealthCheckStatus {
        if self.redirects.get_all_redirect_urls().is_empty() {
            HealthCheckStatus::success(self.text.localize("redirectUrlCheck/none"))
        } else {
            HealthCheckStatus::info(self.text.localize("redirectUrlCheck/present"))
        }
    }
}

#[async_trait]
impl HealthCheck for RedirectUrlManagementCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_redirect_url_management()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            CHECK_REDIRECT_URL_MANAGEMENT => Ok(self.check_redirect_url_management()),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
