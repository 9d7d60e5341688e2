//! CLI command implementations.

mod bundle;
mod export;
mod render_diagrams;

use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{Config, DiagramsConfig};
use folio_diagrams::{DiagramRenderer, MermaidCli, RendererCommand, RendererLocator};
use folio_document::{Scanner, changed_files};

use crate::error::CliError;

pub(crate) use bundle::BundleArgs;
pub(crate) use export::ExportArgs;
pub(crate) use render_diagrams::RenderDiagramsArgs;

/// Input selection shared by every command.
#[derive(Args, Default)]
pub(crate) struct InputArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// File holding a newline-delimited list of posts to process, relative
    /// to the repository root ("-" reads stdin).
    #[arg(long, value_name = "PATH")]
    files_from: Option<PathBuf>,

    /// Newline-delimited list of changed posts, relative to the repository
    /// root. Empty means every post.
    #[arg(long, env = "FOLIO_CHANGED_FILES", hide_env_values = true)]
    changed_files: Option<String>,
}

impl InputArgs {
    /// Explicit file list, if one was given.
    fn file_list(&self) -> Result<Option<String>, CliError> {
        if let Some(path) = &self.files_from {
            let list = if path.as_os_str() == "-" {
                std::io::read_to_string(std::io::stdin())?
            } else {
                std::fs::read_to_string(path)?
            };
            return Ok(Some(list));
        }
        Ok(self
            .changed_files
            .as_ref()
            .filter(|list| !list.trim().is_empty())
            .cloned())
    }

    /// Resolve the markdown files to process.
    ///
    /// An explicit list wins over scanning the source directory; entries
    /// that are not markdown files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NoInput`] when nothing is left to process.
    pub(crate) fn collect(&self, config: &Config) -> Result<Vec<PathBuf>, CliError> {
        let paths = if let Some(list) = self.file_list()? {
            changed_files(&list, &config.content_resolved.repo_root)
                .into_iter()
                .filter(|path| {
                    let keep = is_markdown(path);
                    if !keep {
                        tracing::debug!(path = %path.display(), "Skipping non-markdown entry");
                    }
                    keep
                })
                .collect()
        } else {
            Scanner::new(
                config.content_resolved.source_dir.clone(),
                &config.content_resolved.exclude,
            )?
            .scan()
        };

        if paths.is_empty() {
            return Err(CliError::NoInput);
        }
        Ok(paths)
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Build a diagram renderer from the `[diagrams]` configuration.
pub(crate) fn diagram_renderer(diagrams: &DiagramsConfig) -> DiagramRenderer {
    let command = RendererCommand::resolve(&RendererLocator {
        program: diagrams.program.clone(),
        tools_dir: diagrams.tools_dir.clone(),
        cli_version: Some(diagrams.cli_version.clone()),
    });
    tracing::debug!(program = %command.program(), "Resolved diagram renderer");

    DiagramRenderer::new(MermaidCli::new(command).timeout(diagrams.timeout))
        .inline_width(diagrams.inline_width)
        .link_width(diagrams.bundle_width)
        .background(diagrams.background.as_str())
        .padding(diagrams.padding)
}
