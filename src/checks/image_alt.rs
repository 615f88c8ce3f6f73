// SPDX-License-Identifier: MIT
//! Image alt text property check.
//!
//! First verifies that the "Image" media type carries a property through
//! which alt text can be entered; once it does, a chained action walks the
//! media tree and reports images whose alt value is still empty.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus};
use crate::services::{DataTypeService, MediaService, MediaType, MediaTypeService, PropertyType};

pub const FIX_MISSING_IMAGE_ALT_TAG_PROPERTY: &str = "fixMissingImageAltTagProperty";
pub const CHECK_IMAGES_FOR_ALT_VALUES: &str = "checkImagesForAltValues";

const IMAGE_TYPE_NAME: &str = "Image";
const IMAGE_TYPE_ALIAS: &str = "image";
const TEXT_BOX_EDITOR_ALIAS: &str = "TextBox";

/// Hierarchy depth cut-off when probing for the deepest populated level.
const MAX_MEDIA_LEVEL: u32 = 100;

pub struct ImageAltTagPropertyCheck {
    meta: CheckMeta,
    media: Arc<dyn MediaService>,
    media_types: Arc<dyn MediaTypeService>,
    data_types: Arc<dyn DataTypeService>,
    text: Arc<dyn TextService>,
}

impl ImageAltTagPropertyCheck {
    pub fn new(
        media: Arc<dyn MediaService>,
        media_types: Arc<dyn MediaTypeService>,
        data_types: Arc<dyn DataTypeService>,
        text: Arc<dyn TextService>,
    ) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("99228088-6a96-4fe5-90dd-40f88dd2d5a8"),
                "Image Alt Tag Property Check",
                "Checks that the image media type has a property through which alt tag text can be added to images.",
                "Media",
            ),
            media,
            media_types,
            data_types,
            text,
        }
    }

    fn image_media_type(&self) -> Option<MediaType> {
        self.media_types
            .get_all()
            .into_iter()
            .find(|mt| mt.name == IMAGE_TYPE_NAME)
    }

    fn alt_property(media_type: &MediaType) -> Option<&PropertyType> {
        media_type
            .properties
            .iter()
            .find(|p| p.name.to_lowercase().contains("alt"))
    }

    fn check_image_alt_tag_property(&self) -> HealthCheckStatus {
        // A deployment without an "Image" media type is a configuration
        // precondition failure — reported, not propagated.
        let media_type = match self.image_media_type() {
            Some(mt) => mt,
            None => {
                return HealthCheckStatus::error(
                    self.text.localize("imageAltCheck/mediaTypeMissing"),
                )
            }
        };

        if Self::alt_property(&media_type).is_some() {
            HealthCheckStatus::success(self.text.localize("imageAltCheck/propertySuccess"))
                .with_action(HealthCheckAction::new(
                    CHECK_IMAGES_FOR_ALT_VALUES,
                    self.meta.id,
                    self.text.localize("imageAltCheck/checkValuesName"),
                    self.text.localize("imageAltCheck/checkValuesDescription"),
                ))
        } else {
            HealthCheckStatus::error(self.text.localize("imageAltCheck/propertyFailed"))
                .with_action(HealthCheckAction::new(
                    FIX_MISSING_IMAGE_ALT_TAG_PROPERTY,
                    self.meta.id,
                    self.text.localize("imageAltCheck/fixPropertyName"),
                    self.text.localize("imageAltCheck/fixPropertyDescription"),
                ))
        }
    }

    fn fix_missing_image_alt_tag_property(&self) -> HealthCheckStatus {
        let mut media_type = match self
            .media_types
            .get_all()
            .into_iter()
            .find(|mt| mt.alias.to_lowercase() == IMAGE_TYPE_ALIAS)
        {
            Some(mt) => mt,
            None => {
                return HealthCheckStatus::error(
                    self.text.localize("imageAltCheck/mediaTypeMissing"),
                )
            }
        };

        let text_box = match self
            .data_types
            .get_by_editor_alias(TEXT_BOX_EDITOR_ALIAS)
            .into_iter()
            .next()
        {
            Some(dt) => dt,
            None => {
                return HealthCheckStatus::error(
                    self.text.localize("imageAltCheck/dataTypeMissing"),
                )
            }
        };

        if Self::alt_property(&media_type).is_none() {
            media_type.properties.push(PropertyType {
                alias: "altTag".into(),
                name: "Alt Tag".into(),
                description: "Enter text for the image alt tag.".into(),
                editor_alias: text_box.editor_alias,
            });
            self.media_types.save(media_type);
        }

        HealthCheckStatus::info(self.text.localize("imageAltCheck/propertyAdded"))
    }

    fn check_images_for_alt_values(&self) -> HealthCheckStatus {
        let media_type = match self.image_media_type() {
            Some(mt) => mt,
            None => {
                return HealthCheckStatus::error(
                    self.text.localize("imageAltCheck/mediaTypeMissing"),
                )
            }
        };
        let alt_property = match Self::alt_property(&media_type) {
            Some(p) => p.clone(),
            None => {
                return HealthCheckStatus::error(
                    self.text.localize("imageAltCheck/propertyFailed"),
                )
            }
        };

        // Walk every populated level; the first empty level ends the tree.
        let mut images = Vec::new();
        for level in 1..MAX_MEDIA_LEVEL {
            let items = self.media.get_by_level(level);
            if items.is_empty() {
                break;
            }
            images.extend(
                items
                    .into_iter()
                    .filter(|item| item.content_type == IMAGE_TYPE_NAME),
            );
        }

        let offenders: Vec<String> = images
            .into_iter()
            .filter(|image| {
                image
                    .properties
                    .get(&alt_property.alias)
                    .map(|value| value.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|image| image.name)
            .collect();

        if offenders.is_empty() {
            HealthCheckStatus::success(self.text.localize("imageAltCheck/valuesSuccess"))
        } else {
            HealthCheckStatus::error(format!(
                "{}{}",
                self.text.localize("imageAltCheck/valuesFailed"),
                offenders.join(", ")
            ))
        }
    }
}

#[async_trait]
impl HealthCheck for ImageAltTagPropertyCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_image_alt_tag_property()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            FIX_MISSING_IMAGE_ALT_TAG_PROPERTY => Ok(self.fix_missing_image_alt_tag_property()),
            CHECK_IMAGES_FOR_ALT_VALUES => Ok(self.check_images_for_alt_values()),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
