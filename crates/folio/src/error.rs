//! CLI error types.

use folio_bundle::BundleError;
use folio_config::ConfigError;
use folio_document::DocumentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Bundle(#[from] BundleError),

    #[error("No markdown files to process")]
    NoInput,

    #[error("{failed} of {total} document(s) failed")]
    Failed { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
