use std::path::PathBuf;
use std::time::Duration;

/// Failure of a single renderer invocation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The temporary workspace could not be prepared.
    #[error("Failed to prepare render workspace: {0}")]
    Workspace(#[source] std::io::Error),
    /// The renderer process could not be started.
    #[error("Failed to start renderer '{program}': {source}")]
    Spawn {
        /// Program that was executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The renderer exited unsuccessfully.
    #[error("Renderer failed (exit code {exit_code}): {stderr}")]
    Failed {
        /// Exit code, or -1 when terminated by a signal.
        exit_code: i32,
        /// Captured standard error.
        stderr: String,
    },
    /// The renderer did not finish in time and was killed.
    #[error("Renderer timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
    /// The renderer exited successfully but its output could not be read.
    #[error("Renderer output unreadable: {0}")]
    Output(#[source] std::io::Error),
}

/// Error type for diagram processing.
///
/// Ordinals are 0-based; messages show them 1-based to match the
/// `Mermaid diagram N` alt text.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// A diagram failed to render and the failure policy forbids degrading.
    #[error("{}: diagram {} failed to render: {source}", file.display(), ordinal + 1)]
    Render {
        /// Source document.
        file: PathBuf,
        /// 0-based block ordinal.
        ordinal: usize,
        /// Underlying renderer error.
        #[source]
        source: RenderError,
    },
    /// A diagram block would remain in output that cannot carry it.
    #[error("{}: diagram {} was not rendered ({reason})", file.display(), ordinal + 1)]
    Unrendered {
        /// Source document.
        file: PathBuf,
        /// 0-based block ordinal.
        ordinal: usize,
        /// Why the block was not rendered.
        reason: String,
    },
    /// Writing rendered output failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
