use std::path::PathBuf;

use folio_diagrams::DiagramError;
use folio_document::DocumentError;

/// Error type for producing one document's output.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The source document could not be read or parsed.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// A diagram could not be rendered or substituted.
    #[error(transparent)]
    Diagram(#[from] DiagramError),
    /// Writing output failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl BundleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
