// SPDX-License-Identifier: MIT
//! 500.html error page presence check.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus};
use crate::site::SiteRoot;

pub const ADD_SERVER_ERROR_PAGE: &str = "addServerErrorPage";

const ERROR_PAGE_PATH: &str = "~/500.html";

const DEFAULT_ERROR_PAGE_CONTENT: &str = "<!doctype html><html><head><title>500 Error</title></head><body><div class='text-center'><h1>An internal server error has occurred</h1></div></body></html>";

pub struct ServerErrorPageCheck {
    meta: CheckMeta,
    site: SiteRoot,
    text: Arc<dyn TextService>,
}

impl ServerErrorPageCheck {
    pub fn new(site: SiteRoot, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("70d5b534-ee38-4ed2-9ed7-9be89947e177"),
                "500 Error Page",
                "Check for the existence of a 500.html file for use in the case of internal server errors.",
                "Errors",
            ),
            site,
            text,
        }
    }

    fn check_for_server_error_page(&self) -> HealthCheckStatus {
        if self.site.exists(ERROR_PAGE_PATH) {
            return HealthCheckStatus::success(self.text.localize("serverErrorPageCheck/success"));
        }

        HealthCheckStatus::error(self.text.localize("serverErrorPageCheck/failed")).with_action(
            HealthCheckAction::new(
                ADD_SERVER_ERROR_PAGE,
                self.meta.id,
                self.text.localize("serverErrorPageCheck/rectifyName"),
                self.text.localize("serverErrorPageCheck/rectifyDescription"),
            ),
        )
    }

    fn add_server_error_page(&self) -> Result<HealthCheckStatus> {
        self.site.write(ERROR_PAGE_PATH, DEFAULT_ERROR_PAGE_CONTENT)?;
        Ok(HealthCheckStatus::success(
            self.text.localize("serverErrorPageCheck/success"),
        ))
    }
}

#[async_trait]
impl HealthCheck for ServerErrorPageCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_for_server_error_page()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            ADD_SERVER_ERROR_PAGE => self.add_server_error_page(),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
