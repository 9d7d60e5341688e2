//! Allow-list HTML sanitizer.
//!
//! The fragment is parsed with html5ever (via `scraper`) and re-serialized
//! from the tree, keeping only known elements and attributes:
//!
//! - Dangerous elements are dropped together with their content
//! - Other unknown elements are unwrapped (children kept)
//! - Comments, doctypes and processing instructions are removed
//! - `href`/`src` must match the [`UriPolicy`]; otherwise the attribute is dropped
//! - [`sanitize_with_classes`] also fills in missing classes from a [`ClassTable`]

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Html, Node};

use crate::classes::{ClassTable, Element};

/// Elements removed together with everything inside them.
const DROPPED_ELEMENTS: &[&str] = &[
    "base", "embed", "form", "frame", "frameset", "iframe", "link", "math", "meta", "noscript",
    "object", "script", "select", "style", "svg", "template", "textarea", "title",
];

/// Elements kept as-is.
const ALLOWED_ELEMENTS: &[&str] = &[
    "a",
    "b",
    "blockquote",
    "br",
    "code",
    "dd",
    "del",
    "div",
    "dl",
    "dt",
    "em",
    "figcaption",
    "figure",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "i",
    "img",
    "li",
    "ol",
    "p",
    "pre",
    "s",
    "span",
    "strong",
    "sub",
    "sup",
    "table",
    "tbody",
    "td",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

/// Attributes kept on allowed elements, in output order.
const ALLOWED_ATTRIBUTES: &[&str] = &[
    "class",
    "href",
    "src",
    "alt",
    "title",
    "loading",
    "data-panzoom",
    "start",
    "colspan",
    "rowspan",
    "align",
];

/// Attributes whose values are URIs.
const URI_ATTRIBUTES: &[&str] = &["href", "src"];

/// URI schemes accepted in `href`/`src`.
///
/// `http:` and `https:` are always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriPolicy {
    /// Also accept `data:image/svg+xml;base64,` (inline diagrams).
    DataSvg,
    /// Also accept bundle-relative `images/<file>` paths.
    BundleImages,
}

impl UriPolicy {
    /// Check whether a URI may be kept.
    #[must_use]
    pub fn allows(self, uri: &str) -> bool {
        let uri = uri.trim();
        let lower = uri.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return true;
        }
        match self {
            Self::DataSvg => lower.starts_with("data:image/svg+xml;base64,"),
            Self::BundleImages => is_bundle_image(uri),
        }
    }
}

fn is_bundle_image(uri: &str) -> bool {
    let Some(name) = uri.strip_prefix("images/") else {
        return false;
    };
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':', '?', '#'])
}

/// Sanitize an HTML fragment.
///
/// # Example
///
/// ```
/// use folio_renderer::{UriPolicy, sanitize};
///
/// let html = sanitize(
///     r#"<p onclick="x()">Hi<script>alert(1)</script></p>"#,
///     UriPolicy::DataSvg,
/// );
/// assert_eq!(html, "<p>Hi</p>");
/// ```
#[must_use]
pub fn sanitize(html: &str, policy: UriPolicy) -> String {
    sanitize_with_classes(html, policy, &ClassTable::empty())
}

/// Sanitize an HTML fragment, giving allowed elements that carry no `class`
/// the class from `classes`.
///
/// Raw HTML embedded in markdown bypasses the renderer's class pass; this
/// classes it on the way out.
///
/// # Example
///
/// ```
/// use folio_renderer::{ClassTable, UriPolicy, sanitize_with_classes};
///
/// let html = sanitize_with_classes(
///     r#"<img src="https://example.com/a.png">"#,
///     UriPolicy::DataSvg,
///     &ClassTable::medium(),
/// );
/// assert_eq!(html, r#"<img class="graf graf--image" src="https://example.com/a.png">"#);
/// ```
#[must_use]
pub fn sanitize_with_classes(html: &str, policy: UriPolicy, classes: &ClassTable) -> String {
    let fragment = Html::parse_fragment(html);
    let mut writer = Writer {
        policy,
        classes,
        out: String::with_capacity(html.len()),
    };
    writer.write_children(fragment.root_element());
    writer.out
}

struct Writer<'a> {
    policy: UriPolicy,
    classes: &'a ClassTable,
    out: String,
}

impl Writer<'_> {
    fn write_children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.out.push_str(&encode_text(&**text)),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.write_element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn write_element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        let classes = self.classes;

        if DROPPED_ELEMENTS.contains(&name) {
            tracing::debug!(element = name, "Dropped element");
            return;
        }
        if !ALLOWED_ELEMENTS.contains(&name) {
            self.write_children(element);
            return;
        }

        self.out.push('<');
        self.out.push_str(name);
        for &attr in ALLOWED_ATTRIBUTES {
            let value = match element.value().attr(attr) {
                Some(value) => value,
                None if attr == "class" => {
                    match Element::from_tag(name).and_then(|e| classes.get(e)) {
                        Some(class) => class,
                        None => continue,
                    }
                }
                None => continue,
            };
            if URI_ATTRIBUTES.contains(&attr) && !self.policy.allows(value) {
                tracing::debug!(element = name, attr, "Dropped disallowed URI");
                continue;
            }
            self.push_attr(attr, value);
        }
        self.out.push('>');

        if VOID_ELEMENTS.contains(&name) {
            return;
        }
        self.write_children(element);
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    fn push_attr(&mut self, attr: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(attr);
        self.out.push_str("=\"");
        self.out.push_str(&encode_double_quoted_attribute(value));
        self.out.push('"');
    }
}
