// SPDX-License-Identifier: MIT
//! Custom error configuration check.
//!
//! Four sub-statuses over the two configuration documents:
//! 1. `customErrors` is switched on with a `~/500.html` redirect;
//! 2. `error` child elements are registered for 404 and 500 responses;
//! 3. `httpErrors` (server level) runs in `Custom` error mode, with a
//!    chained pass over its `remove`/`error` child elements;
//! 4. the CMS settings document points `error404` at a real content node.
//!
//! Every fix presence-tests before it appends and overwrites attributes
//! instead of re-adding them, so re-running any fix leaves the documents
//! unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus};
use crate::site::configdoc::{
    append_child, append_text_child, child_elements, child_with_attr, text_of, ConfigDocument,
};

pub const FIX_CUSTOM_ERRORS: &str = "fixCustomErrors";
pub const FIX_MISSING_404_ELEMENT: &str = "fixMissing404Element";
pub const FIX_MISSING_500_ELEMENT: &str = "fixMissing500Element";
pub const FIX_MISSING_HTTP_ERRORS_ELEMENT: &str = "fixMissingHttpErrorsElement";
pub const FIX_MISSING_HTTP_ERRORS_ERROR_MODE: &str = "fixMissingHttpErrorsErrorMode";
pub const FIX_MISSING_REMOVE_404: &str = "fixMissingRemove404";
pub const FIX_MISSING_REMOVE_500: &str = "fixMissingRemove500";
pub const FIX_MISSING_HTTP_ERROR_404: &str = "fixMissingHttpError404";
pub const FIX_MISSING_HTTP_ERROR_500: &str = "fixMissingHttpError500";
pub const FIX_ALL_MISSING_HTTP_ERRORS_ELEMENTS: &str = "fixAllMissingHttpErrorsElements";
pub const CHECK_HTTP_ERRORS_CHILD_NODES: &str = "checkHttpErrorsChildNodes";
pub const FIX_MISSING_SETTINGS_404_NODE: &str = "fixMissingSettings404Node";

const CUSTOM_ERRORS_PATH: &str = "system.web/customErrors";
const HTTP_ERRORS_PATH: &str = "system.webServer/httpErrors";
const SETTINGS_ERRORS_PATH: &str = "content/errors";

const ERROR_PAGE_REDIRECT: &str = "~/500.html";
/// Placeholder the operator replaces with the site's own 404 view.
const ERROR_404_VIEW_PLACEHOLDER: &str = "YOUR_ERROR404_VIEW_HERE";
const SETTINGS_404_PLACEHOLDER_ID: &str = "1";

pub struct CustomErrorsCheck {
    meta: CheckMeta,
    server_config: PathBuf,
    settings_config: PathBuf,
    text: Arc<dyn TextService>,
}

impl CustomErrorsCheck {
    pub fn new(
        server_config: impl Into<PathBuf>,
        settings_config: impl Into<PathBuf>,
        text: Arc<dyn TextService>,
    ) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("08e5f0b4-e6b5-45fe-a61d-70618eee9f65"),
                "Custom Errors Config",
                "Checks that custom errors are configured correctly in the server and CMS configuration documents.",
                "Errors",
            ),
            server_config: server_config.into(),
            settings_config: settings_config.into(),
            text,
        }
    }

    fn action(&self, alias: &str, name_key: &str, description_key: &str) -> HealthCheckAction {
        HealthCheckAction::new(
            alias,
            self.meta.id,
            self.text.localize(name_key),
            self.text.localize(description_key),
        )
    }

    /// A missing document is a reportable condition; a document that does
    /// not parse is a fault.
    fn load_server_config(&self) -> Result<Option<ConfigDocument>> {
        if !self.server_config.exists() {
            return Ok(None);
        }
        ConfigDocument::load(&self.server_config).map(Some)
    }

    // ─── customErrors element ─────────────────────────────────────────────────

    fn check_custom_errors(&self) -> Result<HealthCheckStatus> {
        let success = self.load_server_config()?.is_some_and(|doc| {
            doc.node(CUSTOM_ERRORS_PATH).is_some_and(|el| {
                el.attributes.get("mode").map(String::as_str) == Some("On")
                    && el.attributes.get("defaultRedirect").map(String::as_str)
                        == Some(ERROR_PAGE_REDIRECT)
            })
        });

        if success {
            return Ok(HealthCheckStatus::success(
                self.text.localize("customErrorsCheck/customErrorsSuccess"),
            ));
        }

        Ok(
            HealthCheckStatus::error(self.text.localize("customErrorsCheck/customErrorsFailed"))
                .with_action(self.action(
                    FIX_CUSTOM_ERRORS,
                    "customErrorsCheck/customErrorsRectifyName",
                    "customErrorsCheck/customErrorsRectifyDescription",
                )),
        )
    }

    fn fix_custom_errors(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        let custom_errors = doc.ensure_node(CUSTOM_ERRORS_PATH);
        custom_errors
            .attributes
            .insert("mode".into(), "On".into());
        custom_errors
            .attributes
            .insert("defaultRedirect".into(), ERROR_PAGE_REDIRECT.into());
        doc.save()?;

        Ok(HealthCheckStatus::success(
            self.text.localize("customErrorsCheck/customErrorsSuccess"),
        ))
    }

    // ─── error child elements under customErrors ──────────────────────────────

    fn check_error_elements(&self) -> Result<HealthCheckStatus> {
        let mut tag_404_present = false;
        let mut tag_500_present = false;

        if let Some(doc) = self.load_server_config()? {
            if let Some(custom_errors) = doc.node(CUSTOM_ERRORS_PATH) {
                for el in child_elements(custom_errors) {
                    let status_code = el.attributes.get("statusCode").map(String::as_str);
                    let redirect = el.attributes.get("redirect").map(String::as_str);
                    match (status_code, redirect) {
                        (Some("404"), Some(_)) => tag_404_present = true,
                        (Some("500"), Some(ERROR_PAGE_REDIRECT)) => tag_500_present = true,
                        _ => {}
                    }
                }
            }
        }

        let status = match (tag_404_present, tag_500_present) {
            (true, true) => HealthCheckStatus::success(
                self.text.localize("customErrorsCheck/errorElementsSuccess"),
            ),
            (true, false) => HealthCheckStatus::error(
                self.text.localize("customErrorsCheck/error500ElementFailed"),
            )
            .with_action(self.action(
                FIX_MISSING_500_ELEMENT,
                "customErrorsCheck/missing500ElementRectifyName",
                "customErrorsCheck/missing500ElementRectifyDescription",
            )),
            (false, true) => HealthCheckStatus::error(
                self.text.localize("customErrorsCheck/error404ElementFailed"),
            )
            .with_action(self.action(
                FIX_MISSING_404_ELEMENT,
                "customErrorsCheck/missing404ElementRectifyName",
                "customErrorsCheck/missing404ElementRectifyDescription",
            )),
            (false, false) => HealthCheckStatus::error(
                self.text.localize("customErrorsCheck/errorElementsFailed"),
            )
            .with_action(self.action(
                FIX_MISSING_404_ELEMENT,
                "customErrorsCheck/missing404ElementRectifyName",
                "customErrorsCheck/missing404ElementRectifyDescription",
            )),
        };

        Ok(status)
    }

    fn fix_missing_404_element(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;

        // Offer the sibling fix when the 500 element is also absent.
        let has_500 = doc
            .node(CUSTOM_ERRORS_PATH)
            .and_then(|el| child_with_attr(el, "error", "statusCode", "500"))
            .is_some();
        let mut actions = Vec::new();
        if !has_500 {
            actions.push(self.action(
                FIX_MISSING_500_ELEMENT,
                "customErrorsCheck/missing500ElementRectifyName",
                "customErrorsCheck/missing500ElementRectifyDescription",
            ));
        }

        let custom_errors = doc.ensure_node(CUSTOM_ERRORS_PATH);
        if child_with_attr(custom_errors, "error", "statusCode", "404").is_none() {
            append_child(
                custom_errors,
                "error",
                &[
                    ("statusCode", "404"),
                    ("redirect", ERROR_404_VIEW_PLACEHOLDER),
                ],
            );
        }
        doc.save()?;

        Ok(
            HealthCheckStatus::success(self.text.localize("customErrorsCheck/error404ElementAdded"))
                .with_actions(actions),
        )
    }

    fn fix_missing_500_element(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;

        let has_404 = doc
            .node(CUSTOM_ERRORS_PATH)
            .and_then(|el| child_with_attr(el, "error", "statusCode", "404"))
            .is_some();
        let mut actions = Vec::new();
        if !has_404 {
            actions.push(self.action(
                FIX_MISSING_404_ELEMENT,
                "customErrorsCheck/missing404ElementRectifyName",
                "customErrorsCheck/missing404ElementRectifyDescription",
            ));
        }

        let custom_errors = doc.ensure_node(CUSTOM_ERRORS_PATH);
        if child_with_attr(custom_errors, "error", "statusCode", "500").is_none() {
            append_child(
                custom_errors,
                "error",
                &[("statusCode", "500"), ("redirect", ERROR_PAGE_REDIRECT)],
            );
        }
        doc.save()?;

        Ok(
            HealthCheckStatus::success(self.text.localize("customErrorsCheck/error500ElementAdded"))
                .with_actions(actions),
        )
    }

    // ─── httpErrors element under system.webServer ────────────────────────────

    fn check_http_errors(&self) -> Result<HealthCheckStatus> {
        let doc = match self.load_server_config()? {
            Some(doc) => doc,
            None => {
                return Ok(HealthCheckStatus::error(
                    self.text.localize("customErrorsCheck/httpErrorsFailed"),
                )
                .with_action(self.action(
                    FIX_MISSING_HTTP_ERRORS_ELEMENT,
                    "customErrorsCheck/missingHttpErrorsRectifyName",
                    "customErrorsCheck/missingHttpErrorsRectifyDescription",
                )))
            }
        };

        let status = match doc.node(HTTP_ERRORS_PATH) {
            None => HealthCheckStatus::error(
                self.text.localize("customErrorsCheck/httpErrorsFailed"),
            )
            .with_action(self.action(
                FIX_MISSING_HTTP_ERRORS_ELEMENT,
                "customErrorsCheck/missingHttpErrorsRectifyName",
                "customErrorsCheck/missingHttpErrorsRectifyDescription",
            )),
            Some(el) if el.attributes.get("errorMode").map(String::as_str) != Some("Custom") => {
                HealthCheckStatus::error(
                    self.text
                        .localize("customErrorsCheck/httpErrorsErrorModeFailed"),
                )
                .with_action(self.action(
                    FIX_MISSING_HTTP_ERRORS_ERROR_MODE,
                    "customErrorsCheck/httpErrorsErrorModeRectifyName",
                    "customErrorsCheck/httpErrorsErrorModeRectifyDescription",
                ))
            }
            Some(_) => HealthCheckStatus::success(
                self.text.localize("customErrorsCheck/httpErrorsSuccess"),
            )
            .with_action(self.action(
                CHECK_HTTP_ERRORS_CHILD_NODES,
                "customErrorsCheck/checkChildNodesName",
                "customErrorsCheck/checkChildNodesDescription",
            )),
        };

        Ok(status)
    }

    fn check_http_errors_child_nodes(&self) -> Result<HealthCheckStatus> {
        let doc = match self.load_server_config()? {
            Some(doc) => doc,
            None => {
                return Ok(HealthCheckStatus::error(
                    self.text.localize("customErrorsCheck/httpErrorsFailed"),
                ))
            }
        };

        let http_errors = match doc.node(HTTP_ERRORS_PATH) {
            Some(el) => el,
            None => {
                return Ok(HealthCheckStatus::error(
                    self.text.localize("customErrorsCheck/httpErrorsFailed"),
                ))
            }
        };

        if child_elements(http_errors).next().is_none() {
            return Ok(HealthCheckStatus::error(
                self.text.localize("customErrorsCheck/childNodesEmpty"),
            )
            .with_action(self.action(
                FIX_ALL_MISSING_HTTP_ERRORS_ELEMENTS,
                "customErrorsCheck/fixAllChildrenName",
                "customErrorsCheck/fixAllChildrenDescription",
            )));
        }

        let mut messages = Vec::new();
        let mut actions = Vec::new();

        if child_with_attr(http_errors, "remove", "statusCode", "404").is_none() {
            messages.push(self.text.localize("customErrorsCheck/remove404Failed"));
            actions.push(self.action(
                FIX_MISSING_REMOVE_404,
                "customErrorsCheck/missingRemove404RectifyName",
                "customErrorsCheck/missingRemove404RectifyDescription",
            ));
        }
        if child_with_attr(http_errors, "remove", "statusCode", "500").is_none() {
            messages.push(self.text.localize("customErrorsCheck/remove500Failed"));
            actions.push(self.action(
                FIX_MISSING_REMOVE_500,
                "customErrorsCheck/missingRemove500RectifyName",
                "customErrorsCheck/missingRemove500RectifyDescription",
            ));
        }
        if child_with_attr(http_errors, "error", "statusCode", "404").is_none() {
            messages.push(self.text.localize("customErrorsCheck/httpError404Failed"));
            actions.push(self.action(
                FIX_MISSING_HTTP_ERROR_404,
                "customErrorsCheck/missingHttpError404RectifyName",
                "customErrorsCheck/missingHttpError404RectifyDescription",
            ));
        }
        if child_with_attr(http_errors, "error", "statusCode", "500").is_none() {
            messages.push(self.text.localize("customErrorsCheck/httpError500Failed"));
            actions.push(self.action(
                FIX_MISSING_HTTP_ERROR_500,
                "customErrorsCheck/missingHttpError500RectifyName",
                "customErrorsCheck/missingHttpError500RectifyDescription",
            ));
        }

        if actions.is_empty() {
            return Ok(HealthCheckStatus::success(
                self.text.localize("customErrorsCheck/childNodesSuccess"),
            ));
        }

        Ok(HealthCheckStatus::error(messages.join(" ")).with_actions(actions))
    }

    fn fix_missing_http_errors_element(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        let http_errors = doc.ensure_node(HTTP_ERRORS_PATH);
        http_errors
            .attributes
            .insert("errorMode".into(), "Custom".into());
        doc.save()?;

        // The element now exists but still has no child elements, so the
        // condition is not met yet: report error and chain the bulk fix.
        Ok(
            HealthCheckStatus::error(self.text.localize("customErrorsCheck/httpErrorsAdded"))
                .with_action(self.action(
                    FIX_ALL_MISSING_HTTP_ERRORS_ELEMENTS,
                    "customErrorsCheck/fixAllChildrenName",
                    "customErrorsCheck/fixAllChildrenDescription",
                )),
        )
    }

    fn fix_missing_http_errors_error_mode(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        doc.ensure_node(HTTP_ERRORS_PATH)
            .attributes
            .insert("errorMode".into(), "Custom".into());
        doc.save()?;

        Ok(HealthCheckStatus::success(
            self.text.localize("customErrorsCheck/httpErrorsErrorModeSet"),
        ))
    }

    /// Append a child element under `httpErrors` unless one with the same
    /// name and status code is already registered.
    fn add_http_errors_child(
        doc: &mut ConfigDocument,
        name: &str,
        status_code: &str,
        extra: &[(&str, &str)],
    ) {
        let http_errors = doc.ensure_node(HTTP_ERRORS_PATH);
        if child_with_attr(http_errors, name, "statusCode", status_code).is_some() {
            return;
        }
        let mut attrs = vec![("statusCode", status_code)];
        attrs.extend_from_slice(extra);
        append_child(http_errors, name, &attrs);
    }

    fn fix_missing_remove_404(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        Self::add_http_errors_child(&mut doc, "remove", "404", &[("subStatusCode", "-1")]);
        doc.save()?;

        Ok(
            HealthCheckStatus::success(self.text.localize("customErrorsCheck/remove404Added"))
                .with_action(self.action(
                    CHECK_HTTP_ERRORS_CHILD_NODES,
                    "customErrorsCheck/checkChildNodesName",
                    "customErrorsCheck/checkChildNodesDescription",
                )),
        )
    }

    fn fix_missing_remove_500(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        Self::add_http_errors_child(&mut doc, "remove", "500", &[("subStatusCode", "-1")]);
        doc.save()?;

        Ok(
            HealthCheckStatus::success(self.text.localize("customErrorsCheck/remove500Added"))
                .with_action(self.action(
                    CHECK_HTTP_ERRORS_CHILD_NODES,
                    "customErrorsCheck/checkChildNodesName",
                    "customErrorsCheck/checkChildNodesDescription",
                )),
        )
    }

    fn fix_missing_http_error_404(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        Self::add_http_errors_child(
            &mut doc,
            "error",
            "404",
            &[
                ("prefixLanguageFilePath", ""),
                ("path", "YOUR_ERROR404_VIEW"),
                ("responseMode", "ExecuteURL"),
            ],
        );
        doc.save()?;

        Ok(
            HealthCheckStatus::success(self.text.localize("customErrorsCheck/httpError404Added"))
                .with_action(self.action(
                    CHECK_HTTP_ERRORS_CHILD_NODES,
                    "customErrorsCheck/checkChildNodesName",
                    "customErrorsCheck/checkChildNodesDescription",
                )),
        )
    }

    fn fix_missing_http_error_500(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        Self::add_http_errors_child(
            &mut doc,
            "error",
            "500",
            &[
                ("prefixLanguageFilePath", ""),
                ("path", "500.html"),
                ("responseMode", "File"),
            ],
        );
        doc.save()?;

        Ok(
            HealthCheckStatus::success(self.text.localize("customErrorsCheck/httpError500Added"))
                .with_action(self.action(
                    CHECK_HTTP_ERRORS_CHILD_NODES,
                    "customErrorsCheck/checkChildNodesName",
                    "customErrorsCheck/checkChildNodesDescription",
                )),
        )
    }

    fn fix_all_missing_http_errors_elements(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.server_config)?;
        Self::add_http_errors_child(&mut doc, "remove", "404", &[("subStatusCode", "-1")]);
        Self::add_http_errors_child(&mut doc, "remove", "500", &[("subStatusCode", "-1")]);
        Self::add_http_errors_child(
            &mut doc,
            "error",
            "404",
            &[
                ("prefixLanguageFilePath", ""),
                ("path", "YOUR_ERROR404_VIEW"),
                ("responseMode", "ExecuteURL"),
            ],
        );
        Self::add_http_errors_child(
            &mut doc,
            "error",
            "500",
            &[
                ("prefixLanguageFilePath", ""),
                ("path", "500.html"),
                ("responseMode", "File"),
            ],
        );
        doc.save()?;

        Ok(HealthCheckStatus::success(
            self.text.localize("customErrorsCheck/allChildrenAdded"),
        ))
    }

    // ─── error404 node in the CMS settings document ───────────────────────────

    fn check_settings_404_node(&self) -> Result<HealthCheckStatus> {
        if !self.settings_config.exists() {
            return Ok(self.settings_404_missing_status());
        }
        let doc = ConfigDocument::load(&self.settings_config)?;

        let status = match doc.node("content/errors/error404") {
            Some(el) if text_of(el) == SETTINGS_404_PLACEHOLDER_ID => HealthCheckStatus::error(
                self.text.localize("customErrorsCheck/settings404Placeholder"),
            ),
            Some(_) => HealthCheckStatus::success(
                self.text.localize("customErrorsCheck/settings404Success"),
            ),
            None => self.settings_404_missing_status(),
        };

        Ok(status)
    }

    fn settings_404_missing_status(&self) -> HealthCheckStatus {
        HealthCheckStatus::error(self.text.localize("customErrorsCheck/settings404Missing"))
            .with_action(self.action(
                FIX_MISSING_SETTINGS_404_NODE,
                "customErrorsCheck/settings404RectifyName",
                "customErrorsCheck/settings404RectifyDescription",
            ))
    }

    fn fix_missing_settings_404_node(&self) -> Result<HealthCheckStatus> {
        let mut doc = ConfigDocument::load(&self.settings_config)?;
        let errors = doc.ensure_node(SETTINGS_ERRORS_PATH);
        if errors.get_child("error404").is_none() {
            append_text_child(errors, "error404", "YOUR_ERROR404_NODE_ID_HERE");
        }
        doc.save()?;

        Ok(HealthCheckStatus::success(
            self.text.localize("customErrorsCheck/settings404Added"),
        ))
    }
}

#[async_trait]
impl HealthCheck for CustomErrorsCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![
            self.check_custom_errors()?,
            self.check_error_elements()?,
            self.check_http_errors()?,
            self.check_settings_404_node()?,
        ])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        match alias {
            FIX_CUSTOM_ERRORS => self.fix_custom_errors(),
            FIX_MISSING_404_ELEMENT => self.fix_missing_404_element(),
            FIX_MISSING_500_ELEMENT => self.fix_missing_500_element(),
            FIX_MISSING_HTTP_ERRORS_ELEMENT => self.fix_missing_http_errors_element(),
            FIX_MISSING_HTTP_ERRORS_ERROR_MODE => self.fix_missing_http_errors_error_mode(),
            FIX_MISSING_REMOVE_404 => self.fix_missing_remove_404(),
            FIX_MISSING_REMOVE_500 => self.fix_missing_remove_500(),
            FIX_MISSING_HTTP_ERROR_404 => self.fix_missing_http_error_404(),
            FIX_MISSING_HTTP_ERROR_500 => self.fix_missing_http_error_500(),
            FIX_ALL_MISSING_HTTP_ERRORS_ELEMENTS => self.fix_all_missing_http_errors_elements(),
            CHECK_HTTP_ERRORS_CHILD_NODES => self.check_http_errors_child_nodes(),
            FIX_MISSING_SETTINGS_404_NODE => self.fix_missing_settings_404_node(),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}
