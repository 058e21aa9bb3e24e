use anyhow::Result;
use clap::Parser;
use matecon::cli::{AppContext, Cli, Commands};

/// Log filter variable; falls back to `warn`
const LOG_ENV: &str = "MATECON_LOG";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Convert(args) => matecon::convert_run(args, &ctx),
        Commands::Tree(args) => matecon::tree_run(args, &ctx),
        Commands::Init(args) => matecon::infra::config::init(args, &ctx),
        Commands::Completions(args) => matecon::completion::run(args, &ctx),
    }
}
