//! Renderer program resolution.
//!
//! The renderer is always started with an explicit program and argument
//! vector, never through a shell string, so paths containing spaces behave
//! the same on every platform.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::consts::{DEFAULT_CLI_VERSION, MERMAID_CLI_PACKAGE};

#[cfg(windows)]
const LOCAL_BIN: &str = "mmdc.cmd";
#[cfg(not(windows))]
const LOCAL_BIN: &str = "mmdc";

/// Where to look for the Mermaid CLI.
#[derive(Debug, Clone, Default)]
pub struct RendererLocator {
    /// Explicit program; skips discovery entirely.
    pub program: Option<String>,
    /// Directory whose `node_modules/.bin` may hold a local `mmdc`.
    pub tools_dir: Option<PathBuf>,
    /// Package version for the `npx` shim (defaults to the pinned version).
    pub cli_version: Option<String>,
}

/// A resolved renderer: program plus any arguments that precede the
/// per-job arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererCommand {
    program: OsString,
    prefix_args: Vec<OsString>,
}

impl RendererCommand {
    /// Use `program` directly.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Add arguments placed before every job's own arguments.
    #[must_use]
    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.prefix_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolve the renderer.
    ///
    /// Order: explicit program, local `node_modules/.bin/mmdc` under the
    /// tools directory, `mmdc` on `PATH`, then
    /// `npx -y @mermaid-js/mermaid-cli@<version>`.
    #[must_use]
    pub fn resolve(locator: &RendererLocator) -> Self {
        if let Some(program) = &locator.program {
            tracing::debug!(program, "Using configured renderer");
            return Self::new(program);
        }

        if let Some(local) = locator.tools_dir.as_deref().and_then(local_binary) {
            tracing::debug!(path = %local.display(), "Using local renderer");
            return Self::new(local);
        }

        if let Ok(path) = which::which("mmdc") {
            tracing::debug!(path = %path.display(), "Using renderer from PATH");
            return Self::new(path);
        }

        let version = locator
            .cli_version
            .as_deref()
            .unwrap_or(DEFAULT_CLI_VERSION);
        tracing::info!(version, "mmdc not found, falling back to npx");
        Self::new("npx").with_prefix_args(["-y".to_owned(), format!("{MERMAID_CLI_PACKAGE}@{version}")])
    }

    /// Program name for messages.
    #[must_use]
    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Build a [`Command`] with the prefix arguments applied.
    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        cmd
    }
}

fn local_binary(tools_dir: &Path) -> Option<PathBuf> {
    let candidate = tools_dir.join("node_modules").join(".bin").join(LOCAL_BIN);
    candidate.is_file().then_some(candidate)
}
