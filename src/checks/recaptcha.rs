// SPDX-License-Identifier: MIT
//! ReCaptcha secret key check.
//!
//! Looks for an `appSettings` entry carrying the ReCaptcha secret. Sites
//! without a contact form can ignore a failure here — the result only says
//! the key is absent, not that the site is broken.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus};
use crate::site::configdoc::{append_child, child_with_attr, ConfigDocument};

pub const ADD_RECAPTCHA_KEY: &str = "addReCaptchaKey";

const APP_SETTINGS_PATH: &str = "appSettings";
const RECAPTCHA_KEY: &str = "Google.ReCaptcha.Secret";
const RECAPTCHA_PLACEHOLDER_VALUE: &str = "INSERT_SECRET_KEY_HERE";

pub struct RecaptchaKeyCheck {
    meta: CheckMeta,
    server_config: PathBuf,
    text: Arc<dyn TextService>,
}

impl RecaptchaKeyCheck {
    pub fn new(server_config: impl Into<PathBuf>, text: Arc<dyn TextService>) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("f2a2ba5d-dc5b-432e-b29f-bc2790a4f671"),
                "ReCaptcha Key",
                "Checks that a Google ReCaptcha key has been added to the server configuration (ignore if the site has no contact form or does not need ReCaptcha protection).",
                "ReCaptcha",
            ),
            server_config: server_config.into(),
            text,
        }
    }

    fn check_for_recaptcha_key(&self) -> Result<HealthCheckStatus> {
        let mut success = false;
        if self.server_config.exists() {
            let doc = ConfigDocument::load(&self.server_config)?;
            success = doc
                .node(APP_SETTINGS_PATH)
                .and_then(|el| child_with_attr(el, "add", "key", RECAPTCHA_KEY))
                .is_some();
        }

        if success {
            return Ok(HealthCheckStatus::success(
                self.text.localize("recaptchaCheck/success"),
            ));
        }

        Ok(
            HealthCheckStatus::error(self.text.localize("recaptchaCheck/failed")).with_action(
                HealthCheckAction::new(
                    ADD_RECAPTCHA_KEY,
                    self.meta.id,
                    self.text.localize("recaptchaCheck/rectifyName"),
                    self.text.localize("recaptchaCheck/rectifyDescription"),
                ),
            ),
        )
    }

    fn add_recaptcha_key(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        let app_settings = doc.ensure_node(APP_SETTINGS_PATH);
        if child_with_attr(app_settings, "add", "key", RECAPTCHA_KEY).is_none() {
            append_child(
                app_settings,
                "add",
                &[
                    ("key", RECAPTCHA_KEY),
                    ("value", RECAPTCHA_PLACEHOLDER_VALUE),
                ],
            );
        }
        doc.save()?;

        Ok(HealthCheckStatus::success(
            self.text.localize("recaptchaCheck/keyAdded"),
        ))
    }
}

#[async_trait]
impl HealthCheck for RecaptchaKeyCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_for_recaptcha_key()?])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            ADD_RECAPTCHA_KEY => self.add_recaptcha_key(),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
