mod cli_args;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use log;
use std::process;

use cli_args::{Cli, Commands, GenerateArgs, ProjectConfigOpts, SelectionOpts};
use frontdoc_core::{AppError, Config, MatchMode};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<AppError>() {
                Some(AppError::Config(_)) => 1,
                Some(AppError::TomlParse(_)) => 1,
                Some(AppError::Io(_)) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::Traversal(_)) => 2,
                Some(AppError::Glob(_)) => 5,
                Some(AppError::InvalidArgument(_)) => 5,
                Some(_) => 1,
                None => 1,
            };
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
        }
        Some(Commands::Generate(args)) => {
            log::debug!("Executing 'generate' command...");
            commands::generate::handle_generate_command(args, quiet)?;
        }
        Some(Commands::List(args)) => {
            log::debug!("Executing 'list' command...");
            commands::list::handle_list_command(args, quiet)?;
        }
        Some(Commands::Completion(args)) => {
            log::debug!("Executing 'completion' command...");
            commands::completion::handle_completion_command(&args)?;
        }
    }
    Ok(())
}

fn apply_selection_overrides(config: &mut Config, selection: &SelectionOpts) {
    if let Some(mode) = selection.match_mode.as_deref() {
        config.general.match_mode = match mode {
            "segment" => MatchMode::Segment,
            _ => MatchMode::Legacy,
        };
    }
    config.filters.exclude.extend(selection.exclude.iter().cloned());
}

fn apply_generate_overrides(config: &mut Config, args: &GenerateArgs) {
    if let Some(title) = &args.title {
        config.general.title = title.clone();
    }
    if let Some(output) = &args.output {
        config.output.file = output.clone();
    }
    if args.timestamp {
        config.output.include_timestamp = true;
    }
}

/// Loads the config file (if any) and layers CLI overrides on top.
pub fn load_config_for_command(
    project_root: &std::path::Path,
    project_opts: &ProjectConfigOpts,
    selection: &SelectionOpts,
    generate_args: Option<&GenerateArgs>,
) -> Result<Config> {
    let config_path = Config::resolve_config_path(
        project_root,
        project_opts.config.as_ref(),
        project_opts.no_config,
    )
    .context("Failed to resolve configuration path")?;

    let mut config = match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    apply_selection_overrides(&mut config, selection);
    if let Some(gen_args) = generate_args {
        apply_generate_overrides(&mut config, gen_args);
    }
    log::trace!("Config after CLI overrides: {:?}", config);
    Ok(config)
}
