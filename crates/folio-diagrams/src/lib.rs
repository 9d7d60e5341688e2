//! Mermaid diagram rendering for Folio.
//!
//! Diagrams are rendered by the Mermaid CLI (`mmdc`), one process per
//! diagram, each in its own temporary workspace. Rendered SVG either
//! replaces the fenced block inline as a data URI or is written next to the
//! page and linked with pan/zoom attributes.
//!
//! # Example
//!
//! ```ignore
//! use folio_diagrams::{
//!     DiagramRenderer, MermaidCli, RendererCommand, RendererLocator, SubstitutionPolicy,
//! };
//!
//! let command = RendererCommand::resolve(&RendererLocator::default());
//! let renderer = DiagramRenderer::new(MermaidCli::new(command));
//! let outcome = renderer.process(body, path, &SubstitutionPolicy::Inline)?;
//! for failure in &outcome.failures {
//!     eprintln!("diagram {} kept as source: {}", failure.ordinal + 1, failure.message);
//! }
//! ```

mod backend;
mod blocks;
mod command;
pub mod consts;
mod error;
mod job;
mod prerender;
mod processor;
mod svg;

pub use backend::{DiagramBackend, MermaidCli};
pub use blocks::{DiagramBlock, scan_blocks};
pub use command::{RendererCommand, RendererLocator};
pub use error::{DiagramError, RenderError};
pub use job::RenderJob;
pub use prerender::{PrerenderReport, prerender_file};
pub use processor::{
    DiagramFailure, DiagramOutcome, DiagramRenderer, FailurePolicy, RenderedDiagram,
    SubstitutionPolicy,
};
pub use svg::pad_view_box;
