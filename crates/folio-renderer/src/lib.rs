//! Markdown to Medium-flavored, sanitized HTML.
//!
//! Rendering happens in two steps:
//! - [`MarkdownRenderer`] converts markdown to HTML, writing classes from a
//!   [`ClassTable`] on opening tags as they are emitted
//! - [`sanitize`] reduces the result to an allow-list of elements,
//!   attributes and URI schemes chosen by [`UriPolicy`];
//!   [`sanitize_with_classes`] also classes raw HTML the renderer passed through
//!
//! # Example
//!
//! ```
//! use folio_renderer::{ClassTable, MarkdownRenderer, UriPolicy, sanitize};
//!
//! let mut renderer = MarkdownRenderer::new(ClassTable::medium());
//! let html = sanitize(&renderer.render("# Title\n\n<script>x</script>"), UriPolicy::DataSvg);
//! assert!(html.starts_with("<h1 class=\"graf graf--h1\">Title</h1>"));
//! assert!(!html.contains("script"));
//! ```

mod classes;
mod renderer;
mod sanitize;

pub use classes::{ClassTable, Element};
pub use renderer::MarkdownRenderer;
pub use sanitize::{UriPolicy, sanitize, sanitize_with_classes};
