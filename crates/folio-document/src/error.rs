use std::path::PathBuf;

/// Error type for document reading and discovery.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Front-matter is malformed (unterminated, invalid YAML, or not a mapping).
    #[error("Invalid front-matter in {}: {message}", path.display())]
    Parse {
        /// Path of the offending document.
        path: PathBuf,
        /// Human readable reason.
        message: String,
    },
    /// An exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        /// Pattern as written in the configuration.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },
}
