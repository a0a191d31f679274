//! blogctl CLI - blog posts with threaded comments and likes
//!
//! This is the main entry point for the blogctl command-line tool, which provides:
//! - The HTTP API server (`serve`)
//! - Schema and demo data management (`db`)
//! - A terminal client for the API (`posts`, `comments`)
//! - Configuration management (`config`)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "blogctl",
    author,
    version,
    about = "Blog API server with threaded comments and likes",
    long_about = "Run the blog HTTP API against PostgreSQL, seed demo data, and read or \
                  comment on posts from the terminal."
)]
struct Cli {
    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Database maintenance (migrate, seed)
    Db(commands::db::DbArgs),
    /// Read posts and their comment threads
    Posts(commands::posts::PostsArgs),
    /// Add, edit, delete and like comments
    Comments(commands::comments::CommentsArgs),
    /// Manage blogctl configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Load `.env` files: ~/.blogctl/.env first, then the working directory.
///
/// Variables already set in the environment are never overridden.
fn load_dotenv() {
    let home_env = blogctl_core::BlogConfig::config_dir().join(".env");
    if home_env.exists() {
        dotenvy::from_path(&home_env).ok();
    }
    dotenvy::dotenv().ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    let tracing_config = tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    };
    tracing_setup::init(&tracing_config).ok();

    // Initialize UI quiet mode from flag, env var, and TTY detection
    ui::init_quiet_mode(cli.quiet);

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Db(args) => commands::run_db(args).await,
        Commands::Posts(args) => commands::run_posts(args).await,
        Commands::Comments(args) => commands::run_comments(args).await,
        Commands::Config(args) => config::run_config(args),
        Commands::Completions(args) => run_completions(args),
    };

    tracing_setup::shutdown_otel();
    result
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
