// SPDX-License-Identifier: MIT
//! Media root tidiness check — images belong in folders, not in the root.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckStatus};
use crate::services::MediaService;

pub const CHECK_MEDIA_ROOT: &str = "checkMediaRoot";

const IMAGE_TYPE_NAME: &str = "Image";

pub struct MediaRootCheck {
    meta: CheckMeta,
    media: Arc<dyn MediaService>,
    text: Arc<dyn TextService>,
}

impl MediaRootCheck {
    pub fn new(media: Arc<dyn MediaService>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("35c95219-de87-4afe-94d0-f8ce63707bb2"),
                "Media Root Check",
                "Checks that all media items are inside folders, and not in the root.",
                "Media",
            ),
            media,
            text,
        }
    }

    fn check_media_root(&self) -> HealthCheckStatus {
        let stray_images = self
            .media
            .get_root_media()
            .iter()
            .any(|item| item.content_type == IMAGE_TYPE_NAME);

        if stray_images {
            HealthCheckStatus::error(self.text.localize("mediaRootCheck/failed"))
        } else {
            HealthCheckStatus::success(self.text.localize("mediaRootCheck/success"))
        }
    }
}

#[async_trait]
impl HealthCheck for MediaRootCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_media_root()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            CHECK_MEDIA_ROOT => Ok(self.check_media_root()),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
