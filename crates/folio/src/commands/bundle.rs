//! `folio bundle` command implementation.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use clap::Args;
use folio_bundle::BundleBuilder;
use folio_config::{BundleDiagramMode, CliSettings, Config};

use super::{InputArgs, diagram_renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the bundle command.
#[derive(Args)]
pub(crate) struct BundleArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output root for bundles; cleared on every run (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Mermaid CLI program (overrides discovery).
    #[arg(long)]
    mmdc: Option<String>,
}

impl BundleArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.input.source_dir.clone(),
            bundle_dir: self.output_dir,
            renderer_program: self.mmdc,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let output_root = &config.bundle_resolved.output_dir;
        check_output_root(output_root, &config.content_resolved.source_dir)?;

        let paths = self.input.collect(&config)?;
        output.info(&format!("Processing {} file(s)", paths.len()));

        let builder = BundleBuilder::new(output_root.clone(), diagram_renderer(&config.diagrams_resolved))
            .forbid_diagrams(config.bundle_resolved.diagrams == BundleDiagramMode::Forbid);

        let report = builder.run(&paths)?;
        output.batch(&report);
        output.info(&format!("Output directory: {}", output_root.display()));

        if !report.is_success() {
            return Err(CliError::Failed {
                failed: report.failed.len(),
                total: report.total(),
            });
        }
        Ok(())
    }
}

/// Refuse output roots whose clearing would delete the sources.
///
/// Both paths are made absolute first, so `.` or `content/..` are caught.
fn check_output_root(output_root: &Path, source_dir: &Path) -> Result<(), CliError> {
    let root = resolve_path(output_root)?;
    let source = resolve_path(source_dir)?;
    if source.starts_with(&root) {
        return Err(CliError::Validation(format!(
            "Bundle output directory {} contains the source directory {}",
            output_root.display(),
            source_dir.display()
        )));
    }
    Ok(())
}

/// Canonical path when it exists, otherwise the lexically normalized
/// absolute path.
fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut normalized = PathBuf::new();
            for component in std::path::absolute(path)?.components() {
                match component {
                    Component::CurDir => {}
                    Component::ParentDir => {
                        normalized.pop();
                    }
                    other => normalized.push(other),
                }
            }
            Ok(normalized)
        }
        Err(err) => Err(err),
    }
}
