//! Diagram substitution.
//!
//! [`DiagramRenderer`] finds Mermaid fences in a body and replaces each one
//! according to a [`SubstitutionPolicy`]:
//!
//! - `Inline`: a self-contained `<img>` with a base64 SVG data URI
//! - `Link`: an SVG file in the bundle's images directory, referenced by a
//!   pan/zoom-enabled `<img>`
//! - `Forbid`: no rendering; any remaining fence is an error

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::backend::DiagramBackend;
use crate::blocks::{DiagramBlock, scan_blocks};
use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_INLINE_WIDTH, DEFAULT_LINK_WIDTH, DEFAULT_PADDING};
use crate::svg::pad_view_box;
use crate::{DiagramError, RenderJob};

/// What happens when an inline diagram fails to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep the fenced source and record the failure.
    #[default]
    Degrade,
    /// Fail the whole document.
    Fail,
}

/// How rendered diagrams are substituted into the body.
#[derive(Debug, Clone, Copy)]
pub enum SubstitutionPolicy<'a> {
    /// Embed as a data URI.
    Inline,
    /// Write `<slug>-diagram-<n>.svg` into `images_dir` and link to it.
    Link {
        /// Directory receiving the SVG files.
        images_dir: &'a Path,
        /// Slug used in the file names.
        slug: &'a str,
    },
    /// Diagrams must already be rendered.
    Forbid,
}

/// A diagram that was substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub ordinal: usize,
    /// File written into the images directory (linked diagrams only).
    pub file_name: Option<String>,
}

/// A diagram left as source after a degraded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramFailure {
    pub ordinal: usize,
    pub message: String,
}

/// Result of processing one body.
#[derive(Debug, Clone, Default)]
pub struct DiagramOutcome {
    pub body: String,
    pub rendered: Vec<RenderedDiagram>,
    pub failures: Vec<DiagramFailure>,
}

/// Renders and substitutes Mermaid blocks.
///
/// # Example
///
/// ```ignore
/// use folio_diagrams::{DiagramRenderer, MermaidCli, RendererCommand, SubstitutionPolicy};
///
/// let renderer = DiagramRenderer::new(MermaidCli::new(RendererCommand::new("mmdc")))
///     .padding(8);
/// let outcome = renderer.process(body, path, &SubstitutionPolicy::Inline)?;
/// ```
pub struct DiagramRenderer {
    backend: Box<dyn DiagramBackend>,
    inline_width: u32,
    link_width: u32,
    background: String,
    padding: u32,
    failure_policy: FailurePolicy,
}

impl DiagramRenderer {
    #[must_use]
    pub fn new(backend: impl DiagramBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            inline_width: DEFAULT_INLINE_WIDTH,
            link_width: DEFAULT_LINK_WIDTH,
            background: DEFAULT_BACKGROUND.to_owned(),
            padding: DEFAULT_PADDING,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Render width for inline diagrams (default: 900).
    #[must_use]
    pub fn inline_width(mut self, width: u32) -> Self {
        self.inline_width = width;
        self
    }

    /// Render width for linked diagrams (default: 1100).
    #[must_use]
    pub fn link_width(mut self, width: u32) -> Self {
        self.link_width = width;
        self
    }

    #[must_use]
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// `viewBox` padding for linked diagrams (default: 8).
    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Replace every Mermaid block in `body`.
    ///
    /// Blocks are handled in order, each at most once. `file` names the
    /// source document in errors.
    ///
    /// # Errors
    ///
    /// - [`DiagramError::Unrendered`] when a linked diagram fails or any
    ///   block is present under [`SubstitutionPolicy::Forbid`]
    /// - [`DiagramError::Render`] when an inline diagram fails under
    ///   [`FailurePolicy::Fail`]
    /// - [`DiagramError::Io`] when an SVG file cannot be written
    pub fn process(
        &self,
        body: &str,
        file: &Path,
        policy: &SubstitutionPolicy<'_>,
    ) -> Result<DiagramOutcome, DiagramError> {
        let blocks = scan_blocks(body);
        let mut outcome = DiagramOutcome::default();
        if blocks.is_empty() {
            outcome.body = body.to_owned();
            return Ok(outcome);
        }

        if let SubstitutionPolicy::Link { images_dir, .. } = policy {
            fs::create_dir_all(images_dir).map_err(|source| DiagramError::Io {
                path: images_dir.to_path_buf(),
                source,
            })?;
        }

        let mut out = String::with_capacity(body.len());
        let mut cursor = 0;
        for block in &blocks {
            out.push_str(&body[cursor..block.range.start]);
            let replacement = match policy {
                SubstitutionPolicy::Inline => self.render_inline(block, file, &mut outcome)?,
                SubstitutionPolicy::Link { images_dir, slug } => {
                    Some(self.render_linked(block, file, images_dir, slug, &mut outcome)?)
                }
                SubstitutionPolicy::Forbid => {
                    return Err(DiagramError::Unrendered {
                        file: file.to_path_buf(),
                        ordinal: block.ordinal,
                        reason: "diagram rendering is disabled; pre-render diagrams first".to_owned(),
                    });
                }
            };
            match replacement {
                Some(html) => out.push_str(&html),
                None => out.push_str(&body[block.range.clone()]),
            }
            cursor = block.range.end;
        }
        out.push_str(&body[cursor..]);

        outcome.body = out;
        Ok(outcome)
    }

    fn job(&self, block: &DiagramBlock, width: u32) -> RenderJob {
        RenderJob::new(block.source.as_str())
            .width(width)
            .background(self.background.as_str())
    }

    fn render_inline(
        &self,
        block: &DiagramBlock,
        file: &Path,
        outcome: &mut DiagramOutcome,
    ) -> Result<Option<String>, DiagramError> {
        match self.backend.render(&self.job(block, self.inline_width)) {
            Ok(svg) => {
                outcome.rendered.push(RenderedDiagram {
                    ordinal: block.ordinal,
                    file_name: None,
                });
                Ok(Some(inline_image(&svg)))
            }
            Err(source) if self.failure_policy == FailurePolicy::Fail => Err(DiagramError::Render {
                file: file.to_path_buf(),
                ordinal: block.ordinal,
                source,
            }),
            Err(e) => {
                tracing::warn!(
                    file = %file.display(),
                    diagram = block.ordinal + 1,
                    error = %e,
                    "Diagram render failed, keeping code block"
                );
                outcome.failures.push(DiagramFailure {
                    ordinal: block.ordinal,
                    message: e.to_string(),
                });
                Ok(None)
            }
        }
    }

    fn render_linked(
        &self,
        block: &DiagramBlock,
        file: &Path,
        images_dir: &Path,
        slug: &str,
        outcome: &mut DiagramOutcome,
    ) -> Result<String, DiagramError> {
        let number = block.ordinal + 1;
        let svg = self
            .backend
            .render(&self.job(block, self.link_width))
            .map_err(|e| DiagramError::Unrendered {
                file: file.to_path_buf(),
                ordinal: block.ordinal,
                reason: e.to_string(),
            })?;

        let file_name = format!("{slug}-diagram-{number}.svg");
        let path = images_dir.join(&file_name);
        fs::write(&path, pad_view_box(&svg, self.padding))
            .map_err(|source| DiagramError::Io { path, source })?;
        tracing::debug!(file = %file.display(), diagram = number, output = %file_name, "Rendered diagram");

        let html = linked_image(&file_name, number);
        outcome.rendered.push(RenderedDiagram {
            ordinal: block.ordinal,
            file_name: Some(file_name),
        });
        Ok(html)
    }
}

fn inline_image(svg: &str) -> String {
    format!(
        r#"<img class="graf graf--image" alt="Mermaid diagram" src="data:image/svg+xml;base64,{}">"#,
        STANDARD.encode(svg)
    )
}

fn linked_image(file_name: &str, number: usize) -> String {
    format!(
        "<div class=\"diagram\" data-panzoom=\"svg\">\n  \
         <img src=\"images/{file_name}\" alt=\"Mermaid diagram {number}\" loading=\"lazy\" data-panzoom=\"svg\">\n\
         </div>"
    )
}
