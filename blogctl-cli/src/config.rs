use anyhow::{Context, Result};
use blogctl_core::BlogConfig;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter config to ~/.blogctl/config.toml
    Init(InitArgs),
    /// Print the loaded config as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = BlogConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    BlogConfig::starter().save_to(&config_path)?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Set DATABASE_URL (or edit [server].database_url)");
    println!("  2. Run: blogctl db seed");
    println!("  3. Run: blogctl serve");

    Ok(())
}

fn run_show() -> Result<()> {
    let config = BlogConfig::load()?;
    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    print!("{}", toml_str);
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", BlogConfig::config_path().display());
    Ok(())
}
