//! Rendering backends.

use std::time::Duration;

use crate::command::RendererCommand;
use crate::consts::DEFAULT_TIMEOUT;
use crate::{RenderError, RenderJob};

/// Turns a [`RenderJob`] into SVG text.
pub trait DiagramBackend {
    /// Render one diagram.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the diagram could not be rendered.
    fn render(&self, job: &RenderJob) -> Result<String, RenderError>;
}

/// Backend that runs the Mermaid CLI once per diagram.
#[derive(Debug, Clone)]
pub struct MermaidCli {
    command: RendererCommand,
    timeout: Duration,
}

impl MermaidCli {
    #[must_use]
    pub fn new(command: RendererCommand) -> Self {
        Self {
            command,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-diagram timeout (default: 60 seconds).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl DiagramBackend for MermaidCli {
    fn render(&self, job: &RenderJob) -> Result<String, RenderError> {
        job.run(&self.command, self.timeout)
    }
}
