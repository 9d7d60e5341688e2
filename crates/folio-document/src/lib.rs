//! Post reading and content discovery for Folio.
//!
//! This crate turns markdown files on disk into [`Document`]s and prepares
//! their bodies for conversion:
//!
//! - Front-matter extraction (YAML between `---` delimiter lines)
//! - Slug derivation from the file path ([`slug_for`])
//! - Content discovery by directory walking ([`Scanner`]) or from an explicit
//!   changed-file list ([`changed_files`])
//! - Image path rewriting for published or bundled output ([`rewrite_assets`])
//!
//! # Example
//!
//! ```ignore
//! use folio_document::{AssetTarget, Document, Scanner, rewrite_assets};
//!
//! let scanner = Scanner::new("content/posts".into(), &[])?;
//! for path in scanner.scan() {
//!     let doc = Document::load(&path)?;
//!     let rewritten = rewrite_assets(&doc, &AssetTarget::Bundle);
//!     println!("{}: {} image(s)", doc.slug(), rewritten.references.len());
//! }
//! ```

mod assets;
mod document;
mod error;
mod front_matter;
mod scanner;

pub use assets::{AssetTarget, ImageReference, RewriteResult, rewrite_assets};
pub use document::{Document, slug_for};
pub use error::DocumentError;
pub use front_matter::FrontMatter;
pub use scanner::{Scanner, changed_files};
