//! Page assembly and output materialization for Folio.
//!
//! Two output forms are supported:
//!
//! - [`InlineExporter`]: a flat directory of `<slug>.html` files with
//!   published image URLs and diagrams embedded as data URIs
//! - [`BundleBuilder`]: one `<slug>/` directory per document holding
//!   `index.html` and an `images/` directory with copied images and
//!   rendered diagram SVGs
//!
//! Both run the same per-document pipeline: read, rewrite asset paths,
//! substitute diagrams, render markdown with Medium classes, sanitize, and
//! wrap in the page template. Failures are collected per document in a
//! [`BatchReport`]; one bad document never stops the batch.

mod bundle;
mod error;
mod export;
mod page;
mod report;
mod template;
#[cfg(test)]
mod testing;

pub use bundle::BundleBuilder;
pub use error::BundleError;
pub use export::InlineExporter;
pub use page::render_document;
pub use report::{BatchReport, DocumentFailure, DocumentReport};
pub use template::render_page;
