// SPDX-License-Identifier: MIT
//! Recycle bin check — both the content and media bins should be empty.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus};
use crate::services::{ContentService, MediaService, UserService};

pub const EMPTY_RECYCLE_BIN: &str = "emptyRecycleBin";

pub struct EmptyRecycleBinCheck {
    meta: CheckMeta,
    content: Arc<dyn ContentService>,
    media: Arc<dyn MediaService>,
    users: Arc<dyn UserService>,
    /// Username the delete operations are attributed to.
    operator: String,
    text: Arc<dyn TextService>,
}

impl EmptyRecycleBinCheck {
    pub fn new(
        content: Arc<dyn ContentService>,
        media: Arc<dyn MediaService>,
        users: Arc<dyn UserService>,
        operator: impl Into<String>,
        text: Arc<dyn TextService>,
    ) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("efdcaa20-ee19-403c-b483-f4800ef9191d"),
                "Recycle Bin",
                "Checks that the recycle bin has been emptied.",
                "Recycle Bin",
            ),
            content,
            media,
            users,
            operator: operator.into(),
            text,
        }
    }

    fn check_recycle_bin_is_empty(&self) -> HealthCheckStatus {
        let empty = self.content.recycle_bin_count() == 0 && self.media.recycle_bin_count() == 0;

        if empty {
            return HealthCheckStatus::success(self.text.localize("recycleBinCheck/success"));
        }

        HealthCheckStatus::error(self.text.localize("recycleBinCheck/failed")).with_action(
            HealthCheckAction::new(
                EMPTY_RECYCLE_BIN,
                self.meta.id,
                self.text.localize("recycleBinCheck/emptyName"),
                self.text.localize("recycleBinCheck/emptyDescription"),
            ),
        )
    }

    fn empty_recycle_bin(&self) -> HealthCheckStatus {
        let user = match self.users.get_by_username(&self.operator) {
            Some(user) => user,
            None => {
                return HealthCheckStatus::error(
                    self.text.localize("recycleBinCheck/operatorMissing"),
                )
            }
        };

        info!(operator = %user.username, "emptying content and media recycle bins");
        self.content.empty_recycle_bin(user.id);
        self.media.empty_recycle_bin(user.id);

        HealthCheckStatus::success(self.text.localize("recycleBinCheck/emptied"))
    }
}

#[async_trait]
impl HealthCheck for EmptyRecycleBinCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_recycle_bin_is_empty()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            EMPTY_RECYCLE_BIN => Ok(self.empty_recycle_bin()),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
