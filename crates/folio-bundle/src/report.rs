//! Per-document results and the batch summary.

use std::path::{Path, PathBuf};

use crate::BundleError;

/// A document that was written successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Markdown source.
    pub source_path: PathBuf,
    /// Written HTML file (`<slug>.html` or `<slug>/index.html`).
    pub output_path: PathBuf,
    /// Number of diagrams substituted.
    pub diagrams: usize,
    /// Non-fatal problems: degraded diagrams, missing images.
    pub warnings: Vec<String>,
}

/// A document that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub source_path: PathBuf,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<DocumentReport>,
    pub failed: Vec<DocumentFailure>,
}

impl BatchReport {
    /// Record the result of one document.
    pub fn record(&mut self, source_path: &Path, result: Result<DocumentReport, BundleError>) {
        match result {
            Ok(report) => self.succeeded.push(report),
            Err(e) => {
                tracing::error!(path = %source_path.display(), error = %e, "Document failed");
                self.failed.push(DocumentFailure {
                    source_path: source_path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// Number of documents attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether every document succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total warnings across successful documents.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.succeeded.iter().map(|r| r.warnings.len()).sum()
    }
}
