//! Markdown body to finished page.

use folio_document::Document;
use folio_renderer::{ClassTable, MarkdownRenderer, UriPolicy, sanitize_with_classes};

use crate::template::render_page;

/// Prepend the title heading and TL;DR line to a document's body.
fn compose_markdown(doc: &Document) -> String {
    let mut parts = vec![format!("# {}", doc.title())];
    if let Some(summary) = doc.summary() {
        parts.push(format!("**TL;DR:** {summary}"));
    }
    parts.push(doc.body().to_owned());
    parts.join("\n\n")
}

/// Convert a document's current body into a complete, sanitized page.
///
/// The body should already have its assets rewritten and diagrams
/// substituted; sanitizing is the last transformation applied.
#[must_use]
pub fn render_document(doc: &Document, policy: UriPolicy) -> String {
    let markdown = compose_markdown(doc);
    let classes = ClassTable::medium();
    let html = MarkdownRenderer::new(classes.clone()).render(&markdown);
    render_page(doc.title(), &sanitize_with_classes(&html, policy, &classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn doc(text: &str) -> Document {
        Document::parse(Path::new("posts/my-post/index.md"), text).unwrap()
    }

    #[test]
    fn test_preface_with_tldr() {
        let doc = doc("---\ntitle: My Post\ntldr: Short version\n---\nBody text\n");
        assert_eq!(
            compose_markdown(&doc),
            "# My Post\n\n**TL;DR:** Short version\n\nBody text\n"
        );
    }

    #[test]
    fn test_preface_title_defaults_to_slug() {
        let doc = doc("Body\n");
        assert_eq!(compose_markdown(&doc), "# my-post\n\nBody\n");
    }

    #[test]
    fn test_render_document_classes_and_sanitizing() {
        let doc = doc("---\ntitle: Tom & Jerry\n---\nText <script>alert(1)</script> end\n");
        let page = render_document(&doc, UriPolicy::DataSvg);

        assert!(page.contains("<title>Tom &amp; Jerry</title>"));
        assert!(page.contains("<h1 class=\"graf graf--h1\">Tom &amp; Jerry</h1>"));
        assert!(page.contains("<p class=\"graf graf--p\">Text  end</p>"));
        assert!(!page.contains("alert"));
    }

    #[test]
    fn test_render_document_hostile_title() {
        let doc = doc(
            "---\ntitle: \"<script>alert(1)</script> [x](javascript:alert(1))\"\n---\n\
             <img src=\"https://example.com/a.png\">\n\n[ok](https://example.com)\n",
        );
        let page = render_document(&doc, UriPolicy::DataSvg);

        assert!(!page.contains("<script"));
        assert!(!page.contains("href=\"javascript"));
        assert!(page.contains("<title>&lt;script&gt;"));

        let h1_start = page.find("<h1").unwrap();
        let h1_end = page[h1_start..].find("</h1>").unwrap() + h1_start;
        assert!(!page[h1_start..h1_end].contains("alert"));

        assert!(page.contains(r#"<img class="graf graf--image" src="https://example.com/a.png">"#));
        assert!(page.contains(r#"href="https://example.com""#));
    }
}
