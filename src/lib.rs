// SPDX-License-Identifier: MIT
//! sitecheck — health checks and one-click remediations for deployed CMS
//! sites.
//!
//! Each [`health::HealthCheck`] inspects one aspect of a deployment — a
//! file at the site root, an XML configuration document, a live HTTP
//! response, or a CMS entity — and reports pass/fail statuses that may
//! offer remediation actions. The
//! [`health::registry::HealthCheckRegistry`] owns the registered checks
//! and routes status and action requests.

pub mod checks;
pub mod config;
pub mod error;
pub mod health;
pub mod output;
pub mod services;
pub mod site;

pub use error::{HealthCheckError, Result};
pub use health::registry::{CheckReport, HealthCheckRegistry, HealthReport};
pub use health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus, StatusResultType};
