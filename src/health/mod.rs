// SPDX-License-Identifier: MIT
//! The check contract and its status/action data model.
//!
//! A [`HealthCheck`] encapsulates one diagnosable aspect of a deployed site
//! and, optionally, one or more remediations for it. Inspection
//! ([`HealthCheck::get_status`]) and remediation
//! ([`HealthCheck::execute_action`]) are separate operations: inspection is
//! read-only, remediation is invoked by alias and must be idempotent — running
//! a fix whose condition is already satisfied overwrites, it never duplicates.

pub mod registry;
pub mod text;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

/// Outcome kind of a single status entry. Not a boolean: `Info` is used for
/// advisory results that are neither pass nor fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusResultType {
    Success,
    Warning,
    Error,
    Info,
}

impl StatusResultType {
    /// Returns the worse (higher-severity) of two result kinds, for deriving
    /// an overall report status.
    pub fn worst(a: StatusResultType, b: StatusResultType) -> StatusResultType {
        fn rank(r: StatusResultType) -> u8 {
            match r {
                StatusResultType::Error => 3,
                StatusResultType::Warning => 2,
                StatusResultType::Info => 1,
                StatusResultType::Success => 0,
            }
        }
        if rank(a) >= rank(b) {
            a
        } else {
            b
        }
    }
}

impl std::fmt::Display for StatusResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusResultType::Success => write!(f, "success"),
            StatusResultType::Warning => write!(f, "warning"),
            StatusResultType::Error => write!(f, "error"),
            StatusResultType::Info => write!(f, "info"),
        }
    }
}

/// A remediation (or follow-up inspection) offered by a status entry.
///
/// The alias is meaningful only in combination with `check_id`: aliases are
/// unique per check, not globally. The id is carried so the registry can
/// route the action back without a separate lookup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthCheckAction {
    pub alias: String,
    pub check_id: Uuid,
    pub name: String,
    pub description: String,
}

impl HealthCheckAction {
    pub fn new(
        alias: impl Into<String>,
        check_id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            check_id,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The outcome of one inspection: a message, a result kind, and zero or more
/// offered actions. Produced fresh on every invocation, never stored.
/// Insertion order of `actions` is display order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthCheckStatus {
    pub message: String,
    pub result_type: StatusResultType,
    pub actions: Vec<HealthCheckAction>,
}

impl HealthCheckStatus {
    pub fn new(message: impl Into<String>, result_type: StatusResultType) -> Self {
        Self {
            message: message.into(),
            result_type,
            actions: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, StatusResultType::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, StatusResultType::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, StatusResultType::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, StatusResultType::Info)
    }

    /// Attach an offered action. Returns `self` for builder-style chaining.
    pub fn with_action(mut self, action: HealthCheckAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_actions(mut self, actions: impl IntoIterator<Item = HealthCheckAction>) -> Self {
        self.actions.extend(actions);
        self
    }
}

/// Static display metadata for a check. Registered once at startup, never
/// mutated. The id is the stable routing key for action dispatch.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CheckMeta {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub group: String,
}

impl CheckMeta {
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            group: group.into(),
        }
    }
}

/// A unit of diagnosis + remediation.
///
/// `get_status` must not mutate external state and must not return `Err` for
/// expected failure conditions — a missing file, a failed HTTP request, a
/// missing XML node are all reported as `Error`-kind statuses. Only
/// structural violations (e.g. the configuration document does not parse)
/// may surface as faults; the registry isolates those per check.
///
/// `execute_action` performs exactly one named remediation and returns a
/// status reflecting the new state, which may offer a follow-up action
/// (chaining). An alias outside the check's dispatch table fails fast with
/// [`crate::error::HealthCheckError::UnknownAction`] and performs no
/// mutation.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn meta(&self) -> &CheckMeta;

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>>;

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_orders_error_above_all() {
        use StatusResultType::*;
        assert_eq!(StatusResultType::worst(Success, Error), Error);
        assert_eq!(StatusResultType::worst(Info, Success), Info);
        assert_eq!(StatusResultType::worst(Warning, Info), Warning);
        assert_eq!(StatusResultType::worst(Success, Success), Success);
    }

    #[test]
    fn actions_preserve_insertion_order() {
        let id = Uuid::new_v4();
        let status = HealthCheckStatus::error("broken")
            .with_action(HealthCheckAction::new("first", id, "First", ""))
            .with_action(HealthCheckAction::new("second", id, "Second", ""));
        let aliases: Vec<_> = status.actions.iter().map(|a| a.alias.as_str()).collect();
        assert_eq!(aliases, ["first", "second"]);
    }
}
