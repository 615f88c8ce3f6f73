// SPDX-License-Identifier: MIT
//! Integration tests for the file and configuration-document checks:
//! lifecycle (fail → fix → pass), idempotent remediation, and fault
//! isolation on malformed documents.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use sitecheck::checks::custom_errors::{
    self, CustomErrorsCheck,
};
use sitecheck::checks::recaptcha::{RecaptchaKeyCheck, ADD_RECAPTCHA_KEY};
use sitecheck::checks::robots::{RobotsTxtCheck, ADD_DEFAULT_ROBOTS_FILE};
use sitecheck::checks::server_error_page::{ServerErrorPageCheck, ADD_SERVER_ERROR_PAGE};
use sitecheck::error::HealthCheckError;
use sitecheck::health::text::{KeyEchoTextService, TextService};
use sitecheck::site::SiteRoot;
use sitecheck::{HealthCheck, HealthCheckRegistry, StatusResultType};

fn text() -> Arc<dyn TextService> {
    Arc::new(KeyEchoTextService)
}

/// Write a server configuration document with empty sections.
fn scaffold_bare_web_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("Web.config");
    std::fs::write(
        &path,
        "<configuration><system.web/><system.webServer/><appSettings/></configuration>",
    )
    .unwrap();
    path
}

fn settings_path(dir: &TempDir) -> PathBuf {
    dir.path().join("config/cmsSettings.config")
}

fn scaffold_settings(dir: &TempDir, xml: &str) -> PathBuf {
    let path = settings_path(dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, xml).unwrap();
    path
}

// ─── robots.txt ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn robots_lifecycle_fail_fix_pass() {
    let tmp = TempDir::new().unwrap();
    let check = RobotsTxtCheck::new(SiteRoot::new(tmp.path()), text());

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].actions.len(), 1);
    assert_eq!(statuses[0].actions[0].alias, ADD_DEFAULT_ROBOTS_FILE);

    let fixed = check.execute_action(ADD_DEFAULT_ROBOTS_FILE).await.unwrap();
    assert_eq!(fixed.result_type, StatusResultType::Success);

    let content = std::fs::read_to_string(tmp.path().join("robots.txt")).unwrap();
    assert!(content.contains("User-agent: *"));
    assert!(content.contains("Disallow: /admin/"));

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Success);
    assert!(statuses[0].actions.is_empty());
}

#[tokio::test]
async fn robots_fix_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let check = RobotsTxtCheck::new(SiteRoot::new(tmp.path()), text());

    check.execute_action(ADD_DEFAULT_ROBOTS_FILE).await.unwrap();
    let first = std::fs::read_to_string(tmp.path().join("robots.txt")).unwrap();

    check.execute_action(ADD_DEFAULT_ROBOTS_FILE).await.unwrap();
    let second = std::fs::read_to_string(tmp.path().join("robots.txt")).unwrap();

    assert_eq!(first, second, "re-running the fix must leave the same bytes");
}

#[tokio::test]
async fn robots_unknown_alias_fails_without_mutation() {
    let tmp = TempDir::new().unwrap();
    let check = RobotsTxtCheck::new(SiteRoot::new(tmp.path()), text());

    let err = check.execute_action("bogusAlias").await.unwrap_err();
    assert!(matches!(err, HealthCheckError::UnknownAction { .. }));
    assert!(
        !tmp.path().join("robots.txt").exists(),
        "a rejected alias must not touch the filesystem"
    );
}

// ─── 500 error page ───────────────────────────────────────────────────────────

#[tokio::test]
async fn server_error_page_lifecycle_and_idempotence() {
    let tmp = TempDir::new().unwrap();
    let check = ServerErrorPageCheck::new(SiteRoot::new(tmp.path()), text());

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].actions[0].alias, ADD_SERVER_ERROR_PAGE);

    check.execute_action(ADD_SERVER_ERROR_PAGE).await.unwrap();
    let first = std::fs::read_to_string(tmp.path().join("500.html")).unwrap();
    assert!(first.contains("internal server error"));

    check.execute_action(ADD_SERVER_ERROR_PAGE).await.unwrap();
    let second = std::fs::read_to_string(tmp.path().join("500.html")).unwrap();
    assert_eq!(first, second);

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Success);
}

// ─── customErrors block ───────────────────────────────────────────────────────

fn custom_errors_check(dir: &TempDir) -> CustomErrorsCheck {
    CustomErrorsCheck::new(
        dir.path().join("Web.config"),
        settings_path(dir),
        text(),
    )
}

#[tokio::test]
async fn custom_errors_round_trip() {
    let tmp = TempDir::new().unwrap();
    scaffold_bare_web_config(&tmp);
    scaffold_settings(&tmp, "<settings><content><errors><error404>1050</error404></errors></content></settings>");

    let check = custom_errors_check(&tmp);

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses.len(), 4);
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].actions[0].alias, custom_errors::FIX_CUSTOM_ERRORS);

    let fixed = check
        .execute_action(custom_errors::FIX_CUSTOM_ERRORS)
        .await
        .unwrap();
    assert_eq!(fixed.result_type, StatusResultType::Success);

    let statuses = check.get_status().await.unwrap();
    assert_eq!(
        statuses[0].result_type,
        StatusResultType::Success,
        "recheck after the fix must pass"
    );
}

#[tokio::test]
async fn custom_errors_fix_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let config_path = scaffold_bare_web_config(&tmp);
    let check = custom_errors_check(&tmp);

    check
        .execute_action(custom_errors::FIX_CUSTOM_ERRORS)
        .await
        .unwrap();
    check
        .execute_action(custom_errors::FIX_CUSTOM_ERRORS)
        .await
        .unwrap();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert_eq!(
        content.matches("<customErrors").count(),
        1,
        "re-running the fix must not create a second sibling node"
    );
    assert!(content.contains(r#"mode="On""#));
    assert!(content.contains(r#"defaultRedirect="~/500.html""#));
}

#[tokio::test]
async fn missing_404_element_fix_chains_and_presence_tests() {
    let tmp = TempDir::new().unwrap();
    let config_path = scaffold_bare_web_config(&tmp);
    let check = custom_errors_check(&tmp);

    // Neither child element registered: the fix offers its sibling.
    let fixed = check
        .execute_action(custom_errors::FIX_MISSING_404_ELEMENT)
        .await
        .unwrap();
    assert_eq!(fixed.result_type, StatusResultType::Success);
    assert_eq!(fixed.actions.len(), 1);
    assert_eq!(fixed.actions[0].alias, custom_errors::FIX_MISSING_500_ELEMENT);

    // Re-running must not duplicate the element.
    check
        .execute_action(custom_errors::FIX_MISSING_404_ELEMENT)
        .await
        .unwrap();
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert_eq!(content.matches(r#"statusCode="404""#).count(), 1);

    // With the 500 element present the chained offer disappears.
    let fixed = check
        .execute_action(custom_errors::FIX_MISSING_500_ELEMENT)
        .await
        .unwrap();
    assert!(fixed.actions.is_empty());
}

#[tokio::test]
async fn http_errors_chain_reaches_success() {
    let tmp = TempDir::new().unwrap();
    scaffold_bare_web_config(&tmp);
    let check = custom_errors_check(&tmp);

    // No httpErrors element yet.
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[2].result_type, StatusResultType::Error);
    assert_eq!(
        statuses[2].actions[0].alias,
        custom_errors::FIX_MISSING_HTTP_ERRORS_ELEMENT
    );

    // Adding the element chains into the bulk child fix.
    let added = check
        .execute_action(custom_errors::FIX_MISSING_HTTP_ERRORS_ELEMENT)
        .await
        .unwrap();
    assert_eq!(added.result_type, StatusResultType::Error);
    assert_eq!(
        added.actions[0].alias,
        custom_errors::FIX_ALL_MISSING_HTTP_ERRORS_ELEMENTS
    );

    let bulk = check
        .execute_action(custom_errors::FIX_ALL_MISSING_HTTP_ERRORS_ELEMENTS)
        .await
        .unwrap();
    assert_eq!(bulk.result_type, StatusResultType::Success);

    // The chained verification pass now comes back clean.
    let verified = check
        .execute_action(custom_errors::CHECK_HTTP_ERRORS_CHILD_NODES)
        .await
        .unwrap();
    assert_eq!(verified.result_type, StatusResultType::Success);
    assert!(verified.actions.is_empty());

    // And the full report's httpErrors entry offers only the child pass.
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[2].result_type, StatusResultType::Success);
}

#[tokio::test]
async fn settings_404_node_lifecycle() {
    let tmp = TempDir::new().unwrap();
    scaffold_bare_web_config(&tmp);
    scaffold_settings(&tmp, "<settings><content/></settings>");
    let check = custom_errors_check(&tmp);

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[3].result_type, StatusResultType::Error);
    assert_eq!(
        statuses[3].actions[0].alias,
        custom_errors::FIX_MISSING_SETTINGS_404_NODE
    );

    check
        .execute_action(custom_errors::FIX_MISSING_SETTINGS_404_NODE)
        .await
        .unwrap();

    // Placeholder text is not the default id "1", so the recheck passes.
    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[3].result_type, StatusResultType::Success);
}

#[tokio::test]
async fn settings_404_default_id_is_reported_without_fix() {
    let tmp = TempDir::new().unwrap();
    scaffold_bare_web_config(&tmp);
    scaffold_settings(
        &tmp,
        "<settings><content><errors><error404>1</error404></errors></content></settings>",
    );
    let check = custom_errors_check(&tmp);

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[3].result_type, StatusResultType::Error);
    assert!(
        statuses[3].actions.is_empty(),
        "a present-but-default node has no automated fix"
    );
}

#[tokio::test]
async fn malformed_document_faults_are_isolated_by_the_registry() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Web.config"), "<configuration><unclosed>").unwrap();

    let registry = HealthCheckRegistry::new()
        .with_check(custom_errors_check(&tmp))
        .with_check(RobotsTxtCheck::new(SiteRoot::new(tmp.path()), text()));

    let report = registry.list_statuses().await;
    assert_eq!(report.checks.len(), 2);
    assert_eq!(report.checks[0].statuses.len(), 1);
    assert_eq!(report.checks[0].statuses[0].result_type, StatusResultType::Error);
    assert!(report.checks[0].statuses[0]
        .message
        .contains("could not complete"));
    // The robots check still reported normally.
    assert_eq!(report.checks[1].statuses.len(), 1);
}

// ─── ReCaptcha key ────────────────────────────────────────────────────────────

#[tokio::test]
async fn recaptcha_lifecycle_and_idempotence() {
    let tmp = TempDir::new().unwrap();
    let config_path = scaffold_bare_web_config(&tmp);
    let check = RecaptchaKeyCheck::new(&config_path, text());

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Error);
    assert_eq!(statuses[0].actions[0].alias, ADD_RECAPTCHA_KEY);

    check.execute_action(ADD_RECAPTCHA_KEY).await.unwrap();
    check.execute_action(ADD_RECAPTCHA_KEY).await.unwrap();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert_eq!(
        content.matches("Google.ReCaptcha.Secret").count(),
        1,
        "the key entry must not be duplicated"
    );

    let statuses = check.get_status().await.unwrap();
    assert_eq!(statuses[0].result_type, StatusResultType::Success);
}

#[tokio::test]
async fn recaptcha_check_is_pure() {
    let tmp = TempDir::new().unwrap();
    let config_path = scaffold_bare_web_config(&tmp);
    let check = RecaptchaKeyCheck::new(&config_path, text());

    let before = std::fs::read_to_string(&config_path).unwrap();
    check.get_status().await.unwrap();
    let after = std::fs::read_to_string(&config_path).unwrap();
    assert_eq!(before, after, "inspection must not write the document");
}
