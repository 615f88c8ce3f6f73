// SPDX-License-Identifier: MIT
//! Integration tests for the check registry: fault isolation, action
//! routing, and inspection purity.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use sitecheck::error::HealthCheckError;
use sitecheck::{
    CheckMeta, HealthCheck, HealthCheckRegistry, HealthCheckStatus, StatusResultType,
};

/// A check that always reports the same result kind and counts invocations.
struct StaticCheck {
    meta: CheckMeta,
    result: StatusResultType,
    calls: Arc<AtomicUsize>,
}

impl StaticCheck {
    fn new(name: &str, result: StatusResultType) -> Self {
        Self {
            meta: CheckMeta::new(Uuid::new_v4(), name, "static test check", "Test"),
            result,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl HealthCheck for StaticCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> sitecheck::Result<Vec<HealthCheckStatus>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![HealthCheckStatus::new("static", self.result)])
    }

    async fn execute_action(&self, alias: &str) -> sitecheck::Result<HealthCheckStatus> {
        match alias {
            "noop" => Ok(HealthCheckStatus::success("noop ran")),
            _ => Err(HealthCheckError::UnknownAction {
                alias: alias.to_string(),
            }),
        }
    }
}

/// A check whose inspection faults with a structural error.
struct FaultingCheck {
    meta: CheckMeta,
}

impl FaultingCheck {
    fn new() -> Self {
        Self {
            meta: CheckMeta::new(Uuid::new_v4(), "faulting", "always faults", "Test"),
        }
    }
}

#[async_trait]
impl HealthCheck for FaultingCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> sitecheck::Result<Vec<HealthCheckStatus>> {
        Err(HealthCheckError::Read {
            path: "/nonexistent/web.config".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        })
    }

    async fn execute_action(&self, alias: &str) -> sitecheck::Result<HealthCheckStatus> {
        Err(HealthCheckError::UnknownAction {
            alias: alias.to_string(),
        })
    }
}

/// A check whose inspection panics outright.
struct PanickingCheck {
    meta: CheckMeta,
}

impl PanickingCheck {
    fn new() -> Self {
        Self {
            meta: CheckMeta::new(Uuid::new_v4(), "panicking", "always panics", "Test"),
        }
    }
}

#[async_trait]
impl HealthCheck for PanickingCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> sitecheck::Result<Vec<HealthCheckStatus>> {
        panic!("structural assumption violated");
    }

    async fn execute_action(&self, alias: &str) -> sitecheck::Result<HealthCheckStatus> {
        Err(HealthCheckError::UnknownAction {
            alias: alias.to_string(),
        })
    }
}

#[tokio::test]
async fn faulting_check_does_not_suppress_the_others() {
    let healthy = StaticCheck::new("healthy", StatusResultType::Success);
    let healthy_id = healthy.meta().id;

    let registry = HealthCheckRegistry::new()
        .with_check(FaultingCheck::new())
        .with_check(healthy);

    let report = registry.list_statuses().await;
    assert_eq!(report.checks.len(), 2);

    let faulted = &report.checks[0];
    assert_eq!(faulted.statuses.len(), 1);
    assert_eq!(faulted.statuses[0].result_type, StatusResultType::Error);
    assert!(
        faulted.statuses[0].message.contains("could not complete"),
        "synthetic status should say the check could not complete, got: {}",
        faulted.statuses[0].message
    );

    let healthy_report = &report.checks[1];
    assert_eq!(healthy_report.id, healthy_id);
    assert_eq!(healthy_report.statuses[0].result_type, StatusResultType::Success);

    assert_eq!(report.overall, StatusResultType::Error);
}

#[tokio::test]
async fn panicking_check_is_isolated_too() {
    let registry = HealthCheckRegistry::new()
        .with_check(PanickingCheck::new())
        .with_check(StaticCheck::new("healthy", StatusResultType::Success));

    let report = registry.list_statuses().await;
    assert_eq!(report.checks.len(), 2);
    assert_eq!(report.checks[0].statuses[0].result_type, StatusResultType::Error);
    assert_eq!(report.checks[1].statuses[0].result_type, StatusResultType::Success);
}

#[tokio::test]
async fn overall_is_worst_result_kind() {
    let registry = HealthCheckRegistry::new()
        .with_check(StaticCheck::new("a", StatusResultType::Success))
        .with_check(StaticCheck::new("b", StatusResultType::Info));

    let report = registry.list_statuses().await;
    assert_eq!(report.overall, StatusResultType::Info);
}

#[tokio::test]
async fn repeated_inspection_reports_the_same_kind() {
    let check = StaticCheck::new("stable", StatusResultType::Error);
    let calls = check.calls.clone();
    let registry = HealthCheckRegistry::new().with_check(check);

    let first = registry.list_statuses().await;
    let second = registry.list_statuses().await;

    assert_eq!(
        first.checks[0].statuses[0].result_type,
        second.checks[0].statuses[0].result_type
    );
    // No caching: both report runs invoked the check afresh.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn dispatch_to_unknown_check_id_fails() {
    let registry =
        HealthCheckRegistry::new().with_check(StaticCheck::new("a", StatusResultType::Success));

    let missing = Uuid::new_v4();
    let err = registry.dispatch(missing, "noop").await.unwrap_err();
    match err {
        HealthCheckError::CheckNotFound(id) => assert_eq!(id, missing),
        other => panic!("expected CheckNotFound, got {other}"),
    }
}

#[tokio::test]
async fn dispatch_with_unknown_alias_propagates_the_checks_error() {
    let check = StaticCheck::new("a", StatusResultType::Success);
    let id = check.meta().id;
    let registry = HealthCheckRegistry::new().with_check(check);

    let err = registry.dispatch(id, "definitelyNotAnAlias").await.unwrap_err();
    match err {
        HealthCheckError::UnknownAction { alias } => assert_eq!(alias, "definitelyNotAnAlias"),
        other => panic!("expected UnknownAction, got {other}"),
    }

    // A recognized alias on the same check still routes.
    let status = registry.dispatch(id, "noop").await.unwrap();
    assert_eq!(status.result_type, StatusResultType::Success);
}
