//! Bundle mode: one relocatable directory per document.

use std::fs;
use std::path::{Path, PathBuf};

use folio_diagrams::{DiagramRenderer, SubstitutionPolicy};
use folio_document::{AssetTarget, Document, rewrite_assets};
use folio_renderer::UriPolicy;

use crate::page::render_document;
use crate::{BatchReport, BundleError, DocumentReport};

/// Prefix of per-document staging directories inside the output root.
const STAGING_PREFIX: &str = ".staging-";

/// Images subdirectory of every bundle.
const IMAGES_DIR: &str = "images";

/// Writes `<output_root>/<slug>/index.html` plus `<slug>/images/`.
///
/// Each document is assembled in a staging directory inside the output root
/// and renamed into place only once its HTML, rendered diagrams and copied
/// images are all written, so a failed document never leaves a `<slug>/`
/// directory behind.
pub struct BundleBuilder {
    output_root: PathBuf,
    diagrams: DiagramRenderer,
    forbid_diagrams: bool,
}

impl BundleBuilder {
    #[must_use]
    pub fn new(output_root: PathBuf, diagrams: DiagramRenderer) -> Self {
        Self {
            output_root,
            diagrams,
            forbid_diagrams: false,
        }
    }

    /// Require diagrams to be pre-rendered; any remaining block fails the
    /// document instead of invoking the renderer.
    #[must_use]
    pub fn forbid_diagrams(mut self, forbid: bool) -> Self {
        self.forbid_diagrams = forbid;
        self
    }

    /// Clear and recreate the output root.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Io`] if the directory cannot be removed or created.
    pub fn prepare(&self) -> Result<(), BundleError> {
        if self.output_root.exists() {
            fs::remove_dir_all(&self.output_root)
                .map_err(|e| BundleError::io(&self.output_root, e))?;
            tracing::debug!(path = %self.output_root.display(), "Cleared output root");
        }
        fs::create_dir_all(&self.output_root).map_err(|e| BundleError::io(&self.output_root, e))
    }

    /// Clear the output root, then build every document.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Io`] if the output root cannot be prepared.
    /// Per-document errors are recorded in the report instead.
    pub fn run(&self, paths: &[PathBuf]) -> Result<BatchReport, BundleError> {
        self.prepare()?;

        let mut report = BatchReport::default();
        for path in paths {
            report.record(path, self.build(path));
        }
        Ok(report)
    }

    /// Build a single document's bundle.
    ///
    /// The output root must already exist.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed documents, on any diagram that is not
    /// rendered, and on write errors. Missing image sources are warnings.
    pub fn build(&self, path: &Path) -> Result<DocumentReport, BundleError> {
        let mut doc = Document::load(path)?;
        let rewritten = rewrite_assets(&doc, &AssetTarget::Bundle);

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.output_root)
            .map_err(|e| BundleError::io(&self.output_root, e))?;
        let images_dir = staging.path().join(IMAGES_DIR);
        fs::create_dir_all(&images_dir).map_err(|e| BundleError::io(&images_dir, e))?;

        let policy = if self.forbid_diagrams {
            SubstitutionPolicy::Forbid
        } else {
            SubstitutionPolicy::Link {
                images_dir: &images_dir,
                slug: doc.slug(),
            }
        };
        let outcome = self.diagrams.process(&rewritten.body, path, &policy)?;

        let mut warnings = Vec::new();
        for reference in &rewritten.references {
            if !reference.source_path.is_file() {
                tracing::warn!(
                    source = %path.display(),
                    image = %reference.source_path.display(),
                    "Image source not found"
                );
                warnings.push(format!(
                    "Image source not found: {}",
                    reference.source_path.display()
                ));
                continue;
            }
            let dest = images_dir.join(&reference.target_filename);
            fs::copy(&reference.source_path, &dest).map_err(|e| BundleError::io(&dest, e))?;
        }

        let diagrams = outcome.rendered.len();
        doc.set_body(outcome.body);
        let index = staging.path().join("index.html");
        fs::write(&index, render_document(&doc, UriPolicy::BundleImages))
            .map_err(|e| BundleError::io(&index, e))?;

        let bundle_dir = self.output_root.join(doc.slug());
        if bundle_dir.exists() {
            warnings.push(format!(
                "Replaced bundle '{}' written earlier in this run",
                doc.slug()
            ));
            fs::remove_dir_all(&bundle_dir).map_err(|e| BundleError::io(&bundle_dir, e))?;
        }
        fs::rename(staging.path(), &bundle_dir).map_err(|e| BundleError::io(&bundle_dir, e))?;
        // Renamed away; nothing left for the guard to remove.
        let _ = staging.keep();

        tracing::info!(
            source = %path.display(),
            output = %bundle_dir.display(),
            diagrams,
            "Built bundle"
        );

        Ok(DocumentReport {
            source_path: path.to_path_buf(),
            output_path: bundle_dir.join("index.html"),
            diagrams,
            warnings,
        })
    }
}
