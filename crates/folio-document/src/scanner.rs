//! Content discovery.
//!
//! Posts are found either by walking the content root or from an explicit
//! newline-delimited list of changed files (as produced by CI diff steps).

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::DocumentError;

/// Walks a content root for markdown posts.
///
/// Hidden files and directories are skipped. Paths matching any exclude
/// pattern (relative to the root, `/`-separated) are left out.
pub struct Scanner {
    source_dir: PathBuf,
    exclude: Vec<Pattern>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Pattern`] if an exclude pattern is not a
    /// valid glob.
    pub fn new(source_dir: PathBuf, exclude: &[String]) -> Result<Self, DocumentError> {
        let exclude = exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| DocumentError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source_dir,
            exclude,
        })
    }

    /// Scan the content root and return post paths in sorted order.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    #[must_use]
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if self.source_dir.is_dir() {
            self.scan_directory(&self.source_dir, &mut paths);
        } else {
            tracing::warn!(dir = %self.source_dir.display(), "Content directory does not exist");
        }
        paths.sort();
        paths
    }

    fn scan_directory(&self, dir_path: &Path, paths: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            tracing::warn!(dir = %dir_path.display(), "Failed to read directory");
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            if self.is_excluded(&path) {
                tracing::debug!(path = %path.display(), "Excluded from scan");
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                self.scan_directory(&path, paths);
            } else if path.extension().is_some_and(|e| e == "md") {
                paths.push(path);
            }
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let Ok(rel) = path.strip_prefix(&self.source_dir) else {
            return false;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.exclude.iter().any(|p| p.matches(&rel))
    }
}

/// Resolve a newline-delimited changed-file list against the repository root.
///
/// Blank lines are ignored and surrounding whitespace is trimmed. Absolute
/// entries are kept as-is. Order is preserved and duplicates are dropped.
#[must_use]
pub fn changed_files(list: &str, repo_root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for line in list.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let path = repo_root.join(line);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}
