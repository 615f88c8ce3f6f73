// SPDX-License-Identifier: MIT
//! robots.txt presence check.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus};
use crate::site::SiteRoot;

pub const ADD_DEFAULT_ROBOTS_FILE: &str = "addDefaultRobotsTxtFile";

const ROBOTS_PATH: &str = "~/robots.txt";

/// Default rules: keep crawlers out of the administrative and system
/// folders of the deployment.
const DEFAULT_ROBOTS_CONTENT: &str = "\
User-agent: *
Disallow: /admin/
Disallow: /bin/
Disallow: /config/
Disallow: /views/
";

pub struct RobotsTxtCheck {
    meta: CheckMeta,
    site: SiteRoot,
    text: Arc<dyn TextService>,
}

impl RobotsTxtCheck {
    pub fn new(site: SiteRoot, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("3a482719-3d90-4bc1-b9f8-910cd9cf5b32"),
                "robots.txt",
                "Check for the existence of a robots.txt file.",
                "SEO",
            ),
            site,
            text,
        }
    }

    fn check_for_robots_txt_file(&self) -> HealthCheckStatus {
        if self.site.exists(ROBOTS_PATH) {
            return HealthCheckStatus::success(self.text.localize("robotsCheck/success"));
        }

        HealthCheckStatus::error(self.text.localize("robotsCheck/failed")).with_action(
            HealthCheckAction::new(
                ADD_DEFAULT_ROBOTS_FILE,
                self.meta.id,
                self.text.localize("robotsCheck/rectifyName"),
                self.text.localize("robotsCheck/rectifyDescription"),
            ),
        )
    }

    fn add_default_robots_txt_file(&self) -> Result<HealthCheckStatus> {
        self.site.write(ROBOTS_PATH, DEFAULT_ROBOTS_CONTENT)?;
        Ok(HealthCheckStatus::success(
            self.text.localize("robotsCheck/success"),
        ))
    }
}

#[async_trait]
impl HealthCheck for RobotsTxtCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_for_robots_txt_file()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            ADD_DEFAULT_ROBOTS_FILE => self.add_default_robots_txt_file(),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
