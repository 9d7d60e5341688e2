//! `folio export` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_bundle::InlineExporter;
use folio_config::{CliSettings, Config, RenderFailureMode};
use folio_diagrams::FailurePolicy;
use folio_document::AssetTarget;

use super::{InputArgs, diagram_renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory for HTML files (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Published site base URL used for image links (overrides config).
    #[arg(long)]
    base_url: Option<String>,

    /// Exit non-zero if any document fails.
    #[arg(long)]
    strict: bool,

    /// Mermaid CLI program (overrides discovery).
    #[arg(long)]
    mmdc: Option<String>,
}

impl ExportArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.input.source_dir.clone(),
            export_dir: self.output_dir,
            base_url: self.base_url,
            strict: self.strict.then_some(true),
            renderer_program: self.mmdc,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let base_url = config.require_base_url()?.to_owned();

        let paths = self.input.collect(&config)?;
        output.info(&format!("Processing {} file(s)", paths.len()));

        let export = &config.export_resolved;
        let failure_policy = match export.render_failure {
            RenderFailureMode::Degrade => FailurePolicy::Degrade,
            RenderFailureMode::Fail => FailurePolicy::Fail,
        };
        let exporter = InlineExporter::new(
            export.output_dir.clone(),
            AssetTarget::Published {
                base_url,
                section: config.publish.section.clone(),
            },
            diagram_renderer(&config.diagrams_resolved).failure_policy(failure_policy),
        );

        let report = exporter.run(&paths)?;
        output.batch(&report);
        output.info(&format!("Output directory: {}", export.output_dir.display()));

        if export.strict && !report.is_success() {
            return Err(CliError::Failed {
                failed: report.failed.len(),
                total: report.total(),
            });
        }
        Ok(())
    }
}
