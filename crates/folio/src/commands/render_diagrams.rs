//! `folio render-diagrams` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_diagrams::prerender_file;

use super::{InputArgs, diagram_renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render-diagrams command.
#[derive(Args)]
pub(crate) struct RenderDiagramsArgs {
    /// Markdown files to rewrite (default: the selected input posts).
    files: Vec<PathBuf>,

    #[command(flatten)]
    input: InputArgs,

    /// Mermaid CLI program (overrides discovery).
    #[arg(long)]
    mmdc: Option<String>,
}

impl RenderDiagramsArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.input.source_dir.clone(),
            renderer_program: self.mmdc,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let paths = if self.files.is_empty() {
            self.input.collect(&config)?
        } else {
            self.files
        };
        let renderer = diagram_renderer(&config.diagrams_resolved);

        let mut failed = 0;
        for path in &paths {
            match prerender_file(path, &renderer) {
                Ok(report) if report.written.is_empty() => {
                    output.info(&format!("No mermaid blocks: {}", path.display()));
                }
                Ok(report) => {
                    output.success(&format!(
                        "Rendered {} diagram(s): {}",
                        report.written.len(),
                        path.display()
                    ));
                }
                Err(e) => {
                    failed += 1;
                    output.error(&format!("Failed: {e}"));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Failed {
                failed,
                total: paths.len(),
            });
        }
        Ok(())
    }
}
