//! Colored terminal output utilities.

use std::path::Path;

use console::{Style, Term};
use folio_bundle::BatchReport;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print one line per document followed by a summary.
    pub(crate) fn batch(&self, report: &BatchReport) {
        for doc in &report.succeeded {
            self.success(&format!(
                "Converted: {} -> {}",
                display_name(&doc.source_path),
                doc.output_path.display()
            ));
            for warning in &doc.warnings {
                self.warning(&format!("  Warning: {warning}"));
            }
        }
        for failure in &report.failed {
            self.error(&format!(
                "Failed: {}: {}",
                display_name(&failure.source_path),
                failure.message
            ));
        }

        let summary = format!(
            "Converted {} of {} file(s), {} warning(s)",
            report.succeeded.len(),
            report.total(),
            report.warning_count()
        );
        if report.is_success() {
            self.success(&summary);
        } else {
            self.warning(&summary);
        }
    }
}

/// File name with its parent directory, e.g. `my-post/index.md`.
fn display_name(path: &Path) -> String {
    let file = path.file_name().map(|n| n.to_string_lossy());
    let parent = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy());
    match (parent, file) {
        (Some(parent), Some(file)) => format!("{parent}/{file}"),
        (None, Some(file)) => file.into_owned(),
        _ => path.display().to_string(),
    }
}
