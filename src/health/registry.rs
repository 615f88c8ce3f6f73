// SPDX-License-Identifier: MIT
//! Health check registry — owns the set of registered checks and mediates
//! all status and action requests.
//!
//! Checks run sequentially (several of them make outbound requests to the
//! deployment's own front end, where concurrency only adds load), but each
//! runs inside its own spawned task so a panicking or faulting check is
//! converted into a synthetic `Error` entry for that check alone:
//! - every check `Success` → overall `success`
//! - any `Warning`/`Info`, none `Error` → overall `warning`/`info`
//! - any `Error` → overall `error`
//!
//! There is no caching and no retry: every invocation is a fresh inspection,
//! so results always reflect live state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::{HealthCheck, HealthCheckStatus, StatusResultType};

/// Statuses produced by one registered check during a report run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckReport {
    pub id: Uuid,
    pub name: String,
    pub group: String,
    pub statuses: Vec<HealthCheckStatus>,
}

/// Aggregated report returned by [`HealthCheckRegistry::list_statuses`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthReport {
    /// Worst result kind across every status entry.
    pub overall: StatusResultType,
    pub checks: Vec<CheckReport>,
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
}

/// Process-wide holder of all registered checks, initialized once at startup
/// and immutable thereafter.
pub struct HealthCheckRegistry {
    checks: Vec<Arc<dyn HealthCheck>>,
}

impl HealthCheckRegistry {
    /// Create a new registry with no checks registered.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Register a check. Registration order is report order.
    pub fn with_check(mut self, check: impl HealthCheck + 'static) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    /// Register a boxed check (useful when the concrete type is erased).
    pub fn with_boxed_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn checks(&self) -> impl Iterator<Item = &Arc<dyn HealthCheck>> {
        self.checks.iter()
    }

    pub fn get(&self, check_id: Uuid) -> Option<&Arc<dyn HealthCheck>> {
        self.checks.iter().find(|c| c.meta().id == check_id)
    }

    /// Run every registered check and collect its statuses.
    ///
    /// Checks run one at a time, each in its own task: a check that returns
    /// `Err` or panics contributes a synthetic `Error` entry instead of
    /// aborting the report.
    pub async fn list_statuses(&self) -> HealthReport {
        debug!("running {} health checks", self.checks.len());

        let mut reports: Vec<CheckReport> = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let meta = check.meta().clone();
            let task = {
                let check = Arc::clone(check);
                tokio::spawn(async move { check.get_status().await })
            };
            let statuses = match task.await {
                Ok(Ok(statuses)) => statuses,
                Ok(Err(e)) => {
                    warn!(check = %meta.name, error = %e, "health check faulted");
                    vec![HealthCheckStatus::error(format!(
                        "this check could not complete: {e}"
                    ))]
                }
                Err(e) => {
                    warn!(check = %meta.name, "health check panicked: {e}");
                    vec![HealthCheckStatus::error(format!(
                        "this check could not complete: {e}"
                    ))]
                }
            };
            reports.push(CheckReport {
                id: meta.id,
                name: meta.name,
                group: meta.group,
                statuses,
            });
        }

        let overall = reports
            .iter()
            .flat_map(|r| r.statuses.iter())
            .fold(StatusResultType::Success, |acc, s| {
                StatusResultType::worst(acc, s.result_type)
            });

        HealthReport {
            overall,
            checks: reports,
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// Route an action to the owning check by id and execute it.
    ///
    /// The check's own errors propagate unchanged — in particular
    /// [`HealthCheckError::UnknownAction`]: the registry adds no alias
    /// validation of its own, so a single unrecognized-alias code path
    /// exists, owned by the check.
    pub async fn dispatch(&self, check_id: Uuid, alias: &str) -> Result<HealthCheckStatus> {
        let check = self
            .get(check_id)
            .ok_or(HealthCheckError::CheckNotFound(check_id))?;
        debug!(check = %check.meta().name, alias, "dispatching action");
        check.execute_action(alias).await
    }
}

impl Default for HealthCheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
