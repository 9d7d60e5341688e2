//! Inline export: one self-contained HTML file per document.

use std::fs;
use std::path::{Path, PathBuf};

use folio_diagrams::{DiagramRenderer, SubstitutionPolicy};
use folio_document::{AssetTarget, Document, rewrite_assets};
use folio_renderer::UriPolicy;

use crate::page::render_document;
use crate::{BatchReport, BundleError, DocumentReport};

/// Writes `<output_dir>/<slug>.html` for each document.
///
/// Images point at their published URLs and diagrams are embedded as SVG
/// data URIs. The output directory is created if missing and never cleared.
pub struct InlineExporter {
    output_dir: PathBuf,
    target: AssetTarget,
    diagrams: DiagramRenderer,
}

impl InlineExporter {
    #[must_use]
    pub fn new(output_dir: PathBuf, target: AssetTarget, diagrams: DiagramRenderer) -> Self {
        Self {
            output_dir,
            target,
            diagrams,
        }
    }

    /// Export every document, collecting per-document results.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Io`] if the output directory cannot be created.
    /// Per-document errors are recorded in the report instead.
    pub fn run(&self, paths: &[PathBuf]) -> Result<BatchReport, BundleError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| BundleError::io(&self.output_dir, e))?;

        let mut report = BatchReport::default();
        for path in paths {
            report.record(path, self.export(path));
        }
        Ok(report)
    }

    /// Export a single document.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed documents, on diagram failures when
    /// the renderer's failure policy is `Fail`, and on write errors.
    pub fn export(&self, path: &Path) -> Result<DocumentReport, BundleError> {
        let mut doc = Document::load(path)?;
        let rewritten = rewrite_assets(&doc, &self.target);
        let outcome = self
            .diagrams
            .process(&rewritten.body, path, &SubstitutionPolicy::Inline)?;

        let warnings = outcome
            .failures
            .iter()
            .map(|f| format!("Diagram {} kept as source: {}", f.ordinal + 1, f.message))
            .collect();
        doc.set_body(outcome.body);

        let output_path = self.output_dir.join(format!("{}.html", doc.slug()));
        let page = render_document(&doc, UriPolicy::DataSvg);
        fs::write(&output_path, page).map_err(|e| BundleError::io(&output_path, e))?;
        tracing::info!(
            source = %path.display(),
            output = %output_path.display(),
            "Exported document"
        );

        Ok(DocumentReport {
            source_path: path.to_path_buf(),
            output_path,
            diagrams: outcome.rendered.len(),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, write_post};
    use folio_diagrams::FailurePolicy;

    fn exporter(output_dir: &Path, backend: FakeBackend) -> InlineExporter {
        InlineExporter::new(
            output_dir.to_path_buf(),
            AssetTarget::Published {
                base_url: "https://heyron.dev/".to_owned(),
                section: "posts".to_owned(),
            },
            DiagramRenderer::new(backend),
        )
    }

    #[test]
    fn test_export_rewrites_images_to_published_urls() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_post(
            dir.path(),
            "my-post",
            "---\ntitle: My Post\n---\n\n![Diagram](./diagram.png)\n",
        );
        let out = dir.path().join("out");

        let report = exporter(&out, FakeBackend::default())
            .run(&[source])
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.succeeded[0].output_path, out.join("my-post.html"));
        let html = fs::read_to_string(out.join("my-post.html")).unwrap();
        assert!(html.contains("<title>My Post</title>"));
        assert!(html.contains("<h1 class=\"graf graf--h1\">My Post</h1>"));
        assert!(html.contains(r#"src="https://heyron.dev/posts/my-post/diagram.png""#));
    }

    #[test]
    fn test_export_embeds_diagram_as_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_post(
            dir.path(),
            "flow",
            "Before\n\n```mermaid\ngraph TD; A-->B\n```\n\nAfter\n",
        );
        let out = dir.path().join("out");

        let report = exporter(&out, FakeBackend::default())
            .run(&[source])
            .unwrap();

        assert_eq!(report.succeeded[0].diagrams, 1);
        let html = fs::read_to_string(out.join("flow.html")).unwrap();
        assert!(html.contains(r#"src="data:image/svg+xml;base64,"#));
        assert!(!html.contains("language-mermaid"));
    }

    #[test]
    fn test_export_degrades_failed_diagram() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_post(
            dir.path(),
            "flow",
            "```mermaid\ngraph TD; A-->B\n```\n",
        );
        let out = dir.path().join("out");

        let report = exporter(&out, FakeBackend::failing())
            .run(&[source])
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.warning_count(), 1);
        assert!(report.succeeded[0].warnings[0].starts_with("Diagram 1 kept as source"));
        let html = fs::read_to_string(out.join("flow.html")).unwrap();
        assert!(html.contains("language-mermaid"));
        assert!(html.contains("graph TD; A--&gt;B"));
    }

    #[test]
    fn test_export_fail_policy_fails_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_post(dir.path(), "flow", "```mermaid\ngraph TD; A-->B\n```\n");
        let out = dir.path().join("out");
        let exporter = InlineExporter::new(
            out.clone(),
            AssetTarget::Published {
                base_url: "https://heyron.dev".to_owned(),
                section: "posts".to_owned(),
            },
            DiagramRenderer::new(FakeBackend::failing()).failure_policy(FailurePolicy::Fail),
        );

        let report = exporter.run(&[source]).unwrap();

        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].message.contains("diagram 1 failed to render"));
        assert!(!out.join("flow.html").exists());
    }

    #[test]
    fn test_export_continues_past_bad_document() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_post(dir.path(), "bad", "---\ntitle: [unclosed\n---\nBody\n");
        let good = write_post(dir.path(), "good", "Body\n");
        let out = dir.path().join("out");

        let report = exporter(&out, FakeBackend::default())
            .run(&[bad, good])
            .unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.succeeded.len(), 1);
        assert!(out.join("good.html").exists());
        assert!(!out.join("bad.html").exists());
    }

    #[test]
    fn test_export_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_post(
            dir.path(),
            "flow",
            "---\ntitle: Flow\ntldr: Short\n---\n\n![Shot](shot.png)\n\n\
             ```mermaid\ngraph TD; A-->B\n```\n",
        );
        let out = dir.path().join("out");
        let exporter = exporter(&out, FakeBackend::default());

        exporter.run(std::slice::from_ref(&source)).unwrap();
        let first = fs::read(out.join("flow.html")).unwrap();
        exporter.run(&[source]).unwrap();
        let second = fs::read(out.join("flow.html")).unwrap();

        assert_eq!(first, second);
    }
}
