// SPDX-License-Identifier: MIT
//! Error taxonomy for the check/registry core.
//!
//! Expected failure conditions (a missing file, a failed fetch, a missing
//! XML node) are never errors — checks report those as `Error`-kind statuses.
//! This enum covers the conditions that are allowed to surface as faults:
//! routing mistakes, unparseable configuration documents, and failed writes.

use std::path::PathBuf;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, HealthCheckError>;

#[derive(Debug, thiserror::Error)]
pub enum HealthCheckError {
    /// No registered check carries this id.
    #[error("check not found: {0}")]
    CheckNotFound(Uuid),

    /// The alias is not in the check's dispatch table. This is a
    /// programming/config mismatch (the caller offered an action the check
    /// does not implement) and fails the dispatch loudly.
    #[error("unrecognized action alias: {alias}")]
    UnknownAction { alias: String },

    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document does not parse as XML. A structural
    /// violation like this aborts the single check that hit it; the registry
    /// isolates it from the rest of the report.
    #[error("{path} is not well-formed XML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: xmltree::ParseError,
    },

    #[error("could not serialize {path}: {source}")]
    Emit {
        path: PathBuf,
        #[source]
        source: xmltree::Error,
    },

    #[error("invalid CMS snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}
