//! Pre-rendering diagrams into a post's source directory.

use std::fs;
use std::path::{Path, PathBuf};

use folio_document::slug_for;

use crate::{DiagramError, DiagramRenderer, SubstitutionPolicy};

/// Summary of a pre-rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerenderReport {
    pub path: PathBuf,
    /// SVG files written into `<post dir>/images/`.
    pub written: Vec<String>,
}

/// Render a post's Mermaid blocks into `<post dir>/images/` and rewrite the
/// markdown file in place with linked images.
///
/// SVGs are rendered into a staging directory next to the post and only
/// moved into `images/` once every block has rendered. A file without
/// blocks is left untouched.
///
/// # Errors
///
/// Returns [`DiagramError::Io`] if the file cannot be read or written, and
/// [`DiagramError::Unrendered`] if any diagram fails; neither the markdown
/// file nor `images/` is modified in that case.
pub fn prerender_file(path: &Path, renderer: &DiagramRenderer) -> Result<PrerenderReport, DiagramError> {
    let text = fs::read_to_string(path).map_err(|source| DiagramError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let slug = slug_for(path);
    let post_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging = tempfile::Builder::new()
        .prefix(".folio-svg-")
        .tempdir_in(post_dir)
        .map_err(|source| DiagramError::Io {
            path: post_dir.to_path_buf(),
            source,
        })?;

    let outcome = renderer.process(
        &text,
        path,
        &SubstitutionPolicy::Link {
            images_dir: staging.path(),
            slug: &slug,
        },
    )?;

    let written: Vec<String> = outcome
        .rendered
        .into_iter()
        .filter_map(|d| d.file_name)
        .collect();

    if written.is_empty() {
        tracing::info!(path = %path.display(), "No mermaid blocks found");
    } else {
        let images_dir = post_dir.join("images");
        publish_images(staging.path(), &images_dir, &written)?;
        fs::write(path, &outcome.body).map_err(|source| DiagramError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), count = written.len(), "Rendered diagrams");
    }

    Ok(PrerenderReport {
        path: path.to_path_buf(),
        written,
    })
}

/// Move staged SVGs into the post's `images/` directory.
fn publish_images(staging: &Path, images_dir: &Path, names: &[String]) -> Result<(), DiagramError> {
    fs::create_dir_all(images_dir).map_err(|source| DiagramError::Io {
        path: images_dir.to_path_buf(),
        source,
    })?;
    for name in names {
        let target = images_dir.join(name);
        fs::rename(staging.join(name), &target)
            .map_err(|source| DiagramError::Io { path: target, source })?;
    }
    Ok(())
}
