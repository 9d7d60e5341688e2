//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default wait for one renderer invocation (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Render width for inline (data URI) diagrams.
pub const DEFAULT_INLINE_WIDTH: u32 = 900;

/// Render width for linked diagram files.
pub const DEFAULT_LINK_WIDTH: u32 = 1100;

/// Pixels added to each side of a linked SVG's `viewBox`.
pub const DEFAULT_PADDING: u32 = 8;

/// Background passed to the renderer.
pub const DEFAULT_BACKGROUND: &str = "transparent";

/// Package run through `npx` when no local renderer is found.
pub const MERMAID_CLI_PACKAGE: &str = "@mermaid-js/mermaid-cli";

/// Mermaid CLI version pinned for the `npx` shim.
pub const DEFAULT_CLI_VERSION: &str = "10.9.1";

/// Chromium flags required on sandboxless CI runners.
pub(crate) const SANDBOX_ARGS: [&str; 2] = ["--no-sandbox", "--disable-setuid-sandbox"];

/// Poll interval while waiting for the renderer to exit.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(10);
