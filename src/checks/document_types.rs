// SPDX-License-Identifier: MIT
//! Document type icon check.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckStatus};
use crate::services::ContentTypeService;

pub const CHECK_DOCUMENT_TYPE_ICONS: &str = "checkDocumentTypeIcons";

const DEFAULT_ICON: &str = "icon-document";

pub struct DocumentTypeIconCheck {
    meta: CheckMeta,
    content_types: Arc<dyn ContentTypeService>,
    text: Arc<dyn TextService>,
}

impl DocumentTypeIconCheck {
    pub fn new(content_types: Arc<dyn ContentTypeService>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("345b8686-a220-41ec-8f3d-7e6e9924910f"),
                "Document Type Icons",
                "Checks that all document types have been given an icon.",
                "Document Types",
            ),
            content_types,
            text,
        }
    }

    fn check_document_type_icons(&self) -> HealthCheckStatus {
        let offenders: Vec<String> = self
            .content_types
            .get_all()
            .into_iter()
            .filter(|ct| ct.icon == DEFAULT_ICON)
            .map(|ct| ct.name)
            .collect();

        if offenders.is_empty() {
            return HealthCheckStatus::success(self.text.localize("documentTypeIconCheck/success"));
        }

        HealthCheckStatus::error(format!(
            "{}{}",
            self.text.localize("documentTypeIconCheck/failed"),
            offenders.join(", ")
        ))
    }
}

#[async_trait]
impl HealthCheck for DocumentTypeIconCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_document_type_icons()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            CHECK_DOCUMENT_TYPE_ICONS => Ok(self.check_document_type_icons()),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
