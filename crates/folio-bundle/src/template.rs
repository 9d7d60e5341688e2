//! HTML page template.
//!
//! Pages are complete HTML5 documents with the Medium-like style sheet
//! embedded, so a single exported file renders the same anywhere.

use std::fmt::Write;

use html_escape::encode_text;

/// Style sheet embedded in every page.
const MEDIUM_CSS: &str = r#"    body {
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Oxygen, Ubuntu, Cantarell, "Open Sans", "Helvetica Neue", sans-serif;
      max-width: 700px;
      margin: 0 auto;
      padding: 2rem;
      line-height: 1.7;
      color: rgba(41, 41, 41, 1);
    }

    /* Medium-like styling */
    .graf--h1 {
      font-size: 2.5rem;
      line-height: 1.2;
      margin: 2rem 0 1rem;
      font-weight: 700;
      letter-spacing: -0.02em;
    }

    .graf--h2 {
      font-size: 2rem;
      line-height: 1.25;
      margin: 1.8rem 0 0.8rem;
      font-weight: 600;
      letter-spacing: -0.015em;
    }

    .graf--h3 {
      font-size: 1.5rem;
      line-height: 1.3;
      margin: 1.5rem 0 0.6rem;
      font-weight: 600;
    }

    .graf--h4 {
      font-size: 1.25rem;
      line-height: 1.4;
      margin: 1.2rem 0 0.5rem;
      font-weight: 600;
    }

    .graf--p {
      font-size: 1.1rem;
      line-height: 1.7;
      margin: 1.5rem 0;
      color: rgba(41, 41, 41, 1);
    }

    .graf--blockquote {
      border-left: 4px solid rgba(0, 0, 0, 0.68);
      padding-left: 1.5rem;
      margin: 2rem 0;
      color: rgba(41, 41, 41, 0.8);
      font-style: italic;
      font-size: 1.2rem;
    }

    .graf--pre {
      background: #f8f8f8;
      padding: 1.5rem;
      border-radius: 4px;
      overflow: auto;
      margin: 1.5rem 0;
      border: 1px solid #e6e6e6;
    }

    .markup--code {
      background: rgba(0, 0, 0, 0.05);
      padding: 0.2rem 0.4rem;
      border-radius: 3px;
      font-family: Menlo, Monaco, "Courier New", monospace;
      font-size: 0.9em;
    }

    .markup--pre-code {
      background: transparent;
      padding: 0;
      font-family: Menlo, Monaco, "Courier New", monospace;
      font-size: 0.9rem;
      line-height: 1.5;
    }

    .graf--image {
      max-width: 100%;
      height: auto;
      margin: 2rem 0;
      border-radius: 4px;
      display: block;
    }

    .postList {
      padding-left: 2rem;
      margin: 1.5rem 0;
    }

    .graf--li {
      font-size: 1.1rem;
      line-height: 1.7;
      margin: 0.5rem 0;
    }

    .markup--strong {
      font-weight: 700;
    }

    .markup--em {
      font-style: italic;
    }

    .markup--anchor {
      color: inherit;
      text-decoration: underline;
      text-decoration-color: rgba(0, 0, 0, 0.68);
    }

    .markup--anchor:hover {
      text-decoration-color: rgba(0, 0, 0, 1);
    }

    /* Table styling */
    table {
      border-collapse: collapse;
      width: 100%;
      margin: 2rem 0;
      font-size: 1rem;
    }

    th, td {
      border: 1px solid #ddd;
      padding: 12px;
      text-align: left;
    }

    th {
      background-color: #f8f8f8;
      font-weight: 600;
    }

    tr:nth-child(even) {
      background-color: #f9f9f9;
    }

    /* Code blocks */
    pre code {
      display: block;
      padding: 0;
    }
"#;

/// Render a complete page around a sanitized body fragment.
///
/// The title is escaped; `body_html` is inserted as-is.
#[must_use]
pub fn render_page(title: &str, body_html: &str) -> String {
    let mut html = String::with_capacity(MEDIUM_CSS.len() + body_html.len() + 512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    writeln!(html, "  <title>{}</title>", encode_text(title)).unwrap();
    html.push_str("  <style>\n");
    html.push_str(MEDIUM_CSS);
    html.push_str("  </style>\n</head>\n<body>\n  ");
    html.push_str(body_html);
    html.push_str("\n</body>\n</html>");

    html
}
