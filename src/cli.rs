use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "matecon")]
#[command(about = "Convert material take-off workbooks into JIP-MATERIAL fixed-width text")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress bars and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one or more workbooks into a single text file
    Convert(ConvertArgs),

    /// Show the sheets and material hierarchy read from workbooks
    Tree(TreeArgs),

    /// Initialize a matecon.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Parser)]
pub struct ConvertArgs {
    /// Input workbooks (.xlsx/.xlsm), concatenated in the given order
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output file path (default: first input with a .txt extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(long)]
    pub force: bool,

    /// Skip sheets whose level sequence is malformed
    #[arg(long)]
    pub strict: bool,

    /// Read hidden worksheets too
    #[arg(long)]
    pub include_hidden: bool,
}

#[derive(Debug, Parser)]
pub struct TreeArgs {
    /// Input workbooks (.xlsx/.xlsm)
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Skip sheets whose level sequence is malformed
    #[arg(long)]
    pub strict: bool,

    /// Read hidden worksheets too
    #[arg(long)]
    pub include_hidden: bool,
}

#[derive(Debug, Parser)]
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
