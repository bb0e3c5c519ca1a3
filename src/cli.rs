use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "modroots")]
#[command(
    about = "Discover importable Python module and package roots, namespace packages included"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace); overridden by MODROOTS_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the module and package roots under a directory
    Find(FindArgs),

    /// Test an exclude pattern against relative paths
    Match(MatchArgs),

    /// Initialize a modroots.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One import name per line
    Text,
    /// JSON array of module records
    Json,
    /// Aligned table
    Table,
}

#[derive(Debug, Parser)]
pub struct FindArgs {
    /// Directory to search
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Additional exclude patterns (gitignore-style)
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Drop the built-in and configured exclude lists
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Source extensions to consider (replaces configured list)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Honor .gitignore files while walking
    #[arg(long)]
    pub gitignore: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser)]
pub struct MatchArgs {
    /// Pattern to test
    pub pattern: String,

    /// Relative paths to test
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Base directory for trailing-slash (directory-only) checks
    #[arg(long)]
    pub base: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
