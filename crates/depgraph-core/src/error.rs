//! Error kinds, one per row of the error-handling design table.
//!
//! Messages are single-line and name the offending path so the CLI boundary
//! can print them as-is (see `depgraph-cli`'s `main.rs`).

use thiserror::Error;

/// Errors the core can produce. Most are collected as warnings by the graph
/// builder rather than propagated (see [`BuildWarning`]); the variants here
/// are the ones that abort an operation outright.
#[derive(Debug, Error)]
pub enum DepgraphError {
    #[error("cannot canonicalize path: {path}")]
    PathInvalid { path: String },

    #[error("analyzer failed: {source}")]
    AnalyzerFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unknown output format: {format} (valid options: {valid})")]
    UnknownFormat { format: String, valid: String },

    #[error("version control operation failed: {0}")]
    VcsFailed(String),
}

/// Errors from a single `ContentReader::read` call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error reading {0}")]
    Io(String),
    #[error("permission denied: {0}")]
    Permission(String),
}

/// Per-file failures that do not abort a graph build — collected and
/// surfaced as warnings rather than failing the whole build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    ReadFailed { path: String, reason: ReadError },
    ParseFailed { path: String, reason: String },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::ReadFailed { path, reason } => {
                write!(f, "{path}: read failed: {reason}")
            }
            BuildWarning::ParseFailed { path, reason } => {
                write!(f, "{path}: parse failed: {reason}")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DepgraphError>;
