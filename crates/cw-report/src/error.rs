//! Error types for report generation.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The report destination could not be opened.
    #[error("could not open {path} for writing: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to an open report stream failed.
    #[error("could not write report to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An image could not be saved.
    #[error("could not write image {path}: {source}")]
    AssetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The board renderer could not produce the image saved at `path`.
    #[error("could not render image {path}: {reason}")]
    AssetRender { path: PathBuf, reason: String },

    /// A board renderer failed before the image was tied to a file.
    #[error("could not render board: {0}")]
    Render(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    /// Diagnostic kind for the structured error channel.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ReportError::OutputOpen { .. } => DiagnosticKind::OutputOpen,
            ReportError::OutputWrite { .. } => DiagnosticKind::OutputWrite,
            ReportError::AssetWrite { .. } => DiagnosticKind::AssetWrite,
            ReportError::AssetRender { .. } | ReportError::Render(_) => DiagnosticKind::AssetRender,
            ReportError::InvalidConfig(_) => DiagnosticKind::Other,
        }
    }

    /// Attach the destination of an image to a renderer failure.
    pub fn for_asset(self, path: &Path) -> Self {
        match self {
            ReportError::Render(reason) => ReportError::AssetRender {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        }
    }

    /// Path of the artifact the error concerns, when there is one.
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            ReportError::OutputOpen { path, .. }
            | ReportError::OutputWrite { path, .. }
            | ReportError::AssetWrite { path, .. }
            | ReportError::AssetRender { path, .. } => Some(path.clone()),
            _ => None,
        }
    }
}

/// Classification of a surfaced error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    OutputOpen,
    OutputWrite,
    AssetWrite,
    AssetRender,
    Other,
}

/// A user-facing error recorded during a report run.
///
/// Diagnostics are the session's error channel: the embedding application
/// decides how to show them. Recording one never interrupts the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDiagnostic {
    pub kind: DiagnosticKind,
    pub path: Option<PathBuf>,
    pub message: String,
}

impl From<&ReportError> for ReportDiagnostic {
    fn from(err: &ReportError) -> Self {
        Self {
            kind: err.kind(),
            path: err.path(),
            message: err.to_string(),
        }
    }
}
