//! Parsed posts.

use std::path::{Path, PathBuf};

use crate::DocumentError;
use crate::front_matter::{self, FrontMatter};

/// Base name that marks a page bundle's main file.
const INDEX_STEM: &str = "index";

/// A post read from disk.
///
/// Everything except the body is fixed at parse time. The body is replaced
/// step by step as the pipeline rewrites it.
#[derive(Debug, Clone)]
pub struct Document {
    slug: String,
    title: String,
    summary: Option<String>,
    front_matter: FrontMatter,
    source_path: PathBuf,
    body: String,
}

impl Document {
    /// Read and parse a post from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read and
    /// [`DocumentError::Parse`] if its front-matter is malformed.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Parse a post from in-memory text.
    ///
    /// `path` is used for the slug, for resolving relative assets and in
    /// error messages; it is never read.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the front-matter is unterminated,
    /// is not valid YAML, is not a mapping, or has a non-scalar
    /// `title`/`tldr`/`summary`.
    pub fn parse(path: &Path, text: &str) -> Result<Self, DocumentError> {
        let parse_error = |message: String| DocumentError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let (yaml, body) = front_matter::split(text).map_err(parse_error)?;
        let front_matter = match yaml {
            Some(yaml) => FrontMatter::parse(yaml).map_err(parse_error)?,
            None => FrontMatter::default(),
        };

        let slug = slug_for(path);
        let title = front_matter
            .text("title")
            .map_err(parse_error)?
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| slug.clone());
        let summary = match front_matter.text("tldr").map_err(parse_error)? {
            Some(tldr) => Some(tldr),
            None => front_matter.text("summary").map_err(parse_error)?,
        }
        .filter(|s| !s.trim().is_empty());

        tracing::debug!(path = %path.display(), %slug, "Parsed document");

        Ok(Self {
            slug,
            title,
            summary,
            front_matter,
            source_path: path.to_path_buf(),
            body: body.to_owned(),
        })
    }

    /// Output identifier derived from the source path.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Front-matter title, or the slug when absent.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short summary from `tldr`, falling back to `summary`.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Directory containing the source file; relative assets resolve here.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        self.source_path.parent().unwrap_or(Path::new(""))
    }

    /// Current body text (front-matter removed).
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the body with a rewritten version.
    pub fn set_body(&mut self, body: String) {
        self.body = body;
    }
}

/// Derive a slug from a post path.
///
/// The slug is the file name without extension, except for `index` files,
/// which take the name of their containing directory (page bundles).
///
/// ```
/// use std::path::Path;
/// use folio_document::slug_for;
///
/// assert_eq!(slug_for(Path::new("posts/hello-world.md")), "hello-world");
/// assert_eq!(slug_for(Path::new("posts/my-post/index.md")), "my-post");
/// ```
#[must_use]
pub fn slug_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem == INDEX_STEM
        && let Some(dir) = path.parent().and_then(Path::file_name)
    {
        return dir.to_string_lossy().into_owned();
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slug_for_plain_file() {
        assert_eq!(slug_for(Path::new("content/posts/rust-notes.md")), "rust-notes");
    }

    #[test]
    fn test_slug_for_index_uses_directory() {
        assert_eq!(slug_for(Path::new("content/posts/my-post/index.md")), "my-post");
    }

    #[test]
    fn test_slug_for_bare_index() {
        assert_eq!(slug_for(Path::new("index.md")), "index");
    }

    #[test]
    fn test_parse_with_front_matter() {
        let text = "---\ntitle: Hello World\ntldr: Short version\n---\n\nBody text\n";
        let doc = Document::parse(Path::new("posts/hello/index.md"), text).unwrap();

        assert_eq!(doc.slug(), "hello");
        assert_eq!(doc.title(), "Hello World");
        assert_eq!(doc.summary(), Some("Short version"));
        assert_eq!(doc.body(), "\nBody text\n");
        assert_eq!(doc.source_dir(), Path::new("posts/hello"));
        assert_eq!(doc.front_matter().len(), 2);
    }

    #[test]
    fn test_parse_without_front_matter_defaults_title_to_slug() {
        let doc = Document::parse(Path::new("posts/plain.md"), "Just text").unwrap();
        assert_eq!(doc.title(), "plain");
        assert!(doc.summary().is_none());
        assert!(doc.front_matter().is_empty());
        assert_eq!(doc.body(), "Just text");
    }

    #[test]
    fn test_parse_summary_fallback() {
        let text = "---\nsummary: From summary\n---\nx";
        let doc = Document::parse(Path::new("a.md"), text).unwrap();
        assert_eq!(doc.summary(), Some("From summary"));
    }

    #[test]
    fn test_parse_tldr_wins_over_summary() {
        let text = "---\nsummary: Long\ntldr: Short\n---\nx";
        let doc = Document::parse(Path::new("a.md"), text).unwrap();
        assert_eq!(doc.summary(), Some("Short"));
    }

    #[test]
    fn test_parse_blank_title_falls_back_to_slug() {
        let text = "---\ntitle: \"\"\n---\nx";
        let doc = Document::parse(Path::new("posts/blank.md"), text).unwrap();
        assert_eq!(doc.title(), "blank");
    }

    #[test]
    fn test_parse_unterminated_front_matter_names_file() {
        let err = Document::parse(Path::new("posts/broken.md"), "---\ntitle: x\n").unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
        assert!(err.to_string().contains("posts/broken.md"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = Document::parse(Path::new("bad.md"), "---\ntitle: [x\n---\n").unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
    }

    #[test]
    fn test_parse_list_title_is_error() {
        let err = Document::parse(Path::new("bad.md"), "---\ntitle: [a, b]\n---\n").unwrap_err();
        assert!(err.to_string().contains("'title' must be a string"));
    }

    #[test]
    fn test_set_body() {
        let mut doc = Document::parse(Path::new("a.md"), "old").unwrap();
        doc.set_body("new".to_owned());
        assert_eq!(doc.body(), "new");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Document::load(Path::new("/no/such/post.md")).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "---\ntitle: On Disk\n---\nHi").unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.title(), "On Disk");
        assert_eq!(doc.source_path(), path);
    }
}
