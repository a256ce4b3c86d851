use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Specify the frontend project directory (default: $PROJECT_ROOT or current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Specify path of the TOML config file (default: <project>/frontdoc.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "no_config",
        help_heading = "Project Setup"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config",
        help_heading = "Project Setup"
    )]
    pub no_config: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SelectionOpts {
    #[arg(
        long,
        value_name = "MODE",
        value_parser = ["legacy", "segment"],
        help = "How skip patterns and the public directory are matched [default: legacy].",
        help_heading = "File Selection"
    )]
    pub match_mode: Option<String>,

    #[arg(
        long = "exclude",
        value_name = "PATTERN",
        action = clap::ArgAction::Append,
        help = "Add an exclude glob, matched against paths relative to the project root.",
        help_heading = "File Selection"
    )]
    pub exclude: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "frontdoc",
    author,
    version,
    about = "Compile a frontend project's sources into one Markdown document.",
    long_about = "frontdoc walks a frontend project, selects its JavaScript, JSX, JSON, CSS and HTML \nfiles, and writes them into a single Markdown document with a table of contents, \ngrouped into configuration, public and source sections.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  frontdoc generate\n  frontdoc generate --project-root ../shop -o docs/shop.md\n  frontdoc list --match-mode segment",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "g",
        visible_alias = "gen",
        about = "Generate the project documentation file."
    )]
    Generate(GenerateArgs),

    #[command(
        visible_alias = "ls",
        about = "Show which files would be documented, in document order."
    )]
    List(ListArgs),

    #[command(about = "Print shell completion scripts.")]
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub selection: SelectionOpts,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Output file [default: frontend_documentation.md in the current directory].",
        help_heading = "Output Control",
        conflicts_with = "stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        help = "Write the document to standard output instead of a file.",
        help_heading = "Output Control"
    )]
    pub stdout: bool,

    #[arg(
        long,
        value_name = "TITLE",
        help = "Override the document title.",
        help_heading = "Output Control"
    )]
    pub title: Option<String>,

    #[arg(
        long,
        help = "Add a generation timestamp to the title block.",
        help_heading = "Output Control"
    )]
    pub timestamp: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub selection: SelectionOpts,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: bash]"
    )]
    pub shell: Option<String>,
}
