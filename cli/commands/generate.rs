use crate::cli_args::GenerateArgs;
use crate::load_config_for_command;
use crate::output;
use anyhow::{Context, Result};
use colored::Colorize;
use frontdoc_core::{self as core, Config};
use log;

pub fn handle_generate_command(args: GenerateArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(
        &project_root,
        &args.project_config,
        &args.selection,
        Some(&args),
    )
    .context("Failed to load configuration")?;

    if !quiet && !args.stdout {
        println!("{} Starting frontend documentation generation...", "🚀".blue());
        println!(
            "{} Root directory: {}",
            "📍".blue(),
            project_root.display().to_string().cyan()
        );
    }

    let document = core::compile(&project_root, &config)
        .context("Failed to compile project documentation")?;
    log::debug!("Document assembled ({} bytes).", document.len());

    if args.stdout {
        log::debug!("Output target set to stdout.");
        return output::write_to_stdout(&document);
    }

    let output_path = &config.output.file;
    log::info!("Saving documentation to: {}", output_path.display());
    core::write_document(output_path, &document)
        .with_context(|| format!("Failed to save documentation to {}", output_path.display()))?;
    output::report_saved(output_path, quiet)
}
