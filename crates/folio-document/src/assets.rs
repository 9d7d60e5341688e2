//! Image path rewriting.
//!
//! Relative image targets in markdown (`![alt](path "title")`) and raw HTML
//! (`<img src="path">`) are rewritten for the chosen output form. Network
//! URLs, protocol-relative URLs, `data:` URIs, other schemes and
//! root-absolute paths are left byte-identical.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::Document;

/// `![alt](target "title")`
static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[[^\]]*\]\(\s*(?P<target>[^\s)]+)(?:\s+"[^"]*")?\s*\)"#).unwrap()
});

/// `<img ... src="target">` or `src='target'`.
static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#).unwrap()
});

/// `scheme:` prefix per RFC 3986.
static URI_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Where rewritten image targets should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetTarget {
    /// Absolute URLs on the published site:
    /// `{base_url}/{section}/{slug}/{relative path}`.
    Published {
        /// Site base URL; a trailing `/` is ignored.
        base_url: String,
        /// Section path segment (e.g. `posts`).
        section: String,
    },
    /// Bundle-relative paths: `images/{file name}`.
    Bundle,
}

/// A local image a document depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Source file, resolved against the document's directory.
    pub source_path: PathBuf,
    /// File name inside the bundle's `images/` directory.
    pub target_filename: String,
}

/// Rewritten body and the local images it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub body: String,
    pub references: Vec<ImageReference>,
}

/// Rewrite relative image targets in a document's body.
///
/// Pure: the filesystem is never touched and nothing is shared between
/// documents. References are returned in body order, one per rewritten
/// occurrence.
#[must_use]
pub fn rewrite_assets(doc: &Document, target: &AssetTarget) -> RewriteResult {
    rewrite_body(doc.body(), doc.source_dir(), doc.slug(), target)
}

fn rewrite_body(body: &str, source_dir: &Path, slug: &str, target: &AssetTarget) -> RewriteResult {
    let mut spans: Vec<Range<usize>> = MARKDOWN_IMAGE
        .captures_iter(body)
        .filter_map(|caps| caps.name("target").map(|m| m.range()))
        .collect();
    spans.extend(HTML_IMAGE.captures_iter(body).filter_map(|caps| {
        caps.name("dq")
            .or_else(|| caps.name("sq"))
            .map(|m| m.range())
    }));
    spans.sort_by_key(|span| span.start);

    let mut out = String::with_capacity(body.len());
    let mut references = Vec::new();
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor {
            continue;
        }
        let original = &body[span.clone()];
        let Some(relative) = local_path(original) else {
            continue;
        };
        let Some(filename) = Path::new(relative).file_name() else {
            continue;
        };
        let filename = filename.to_string_lossy().into_owned();

        let rewritten = match target {
            AssetTarget::Published { base_url, section } => format!(
                "{}/{}/{slug}/{relative}",
                base_url.trim_end_matches('/'),
                section.trim_matches('/'),
            ),
            AssetTarget::Bundle => format!("images/{filename}"),
        };

        out.push_str(&body[cursor..span.start]);
        out.push_str(&rewritten);
        cursor = span.end;

        references.push(ImageReference {
            source_path: source_dir.join(relative),
            target_filename: filename,
        });
    }
    out.push_str(&body[cursor..]);

    if !references.is_empty() {
        tracing::debug!(slug, count = references.len(), "Rewrote image paths");
    }

    RewriteResult {
        body: out,
        references,
    }
}

/// Return the document-relative path for a local target, or `None` if the
/// target must be left alone.
fn local_path(target: &str) -> Option<&str> {
    if target.is_empty()
        || target.starts_with("//")
        || target.starts_with('/')
        || target.starts_with('#')
        || URI_SCHEME.is_match(target)
    {
        return None;
    }
    let relative = target.trim_start_matches("./");
    if relative.is_empty() || relative.ends_with('/') {
        return None;
    }
    Some(relative)
}
