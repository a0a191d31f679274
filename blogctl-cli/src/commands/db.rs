//! Database commands - schema and demo data
//!
//! `db seed` replaces all blog data, so it is meant for development databases.

use anyhow::{Context, Result};
use blogctl_core::BlogConfig;
use blogctl_server::db::{create_pool, migrations, seed};
use clap::{Parser, Subcommand};

use crate::ui;

#[derive(Parser, Debug)]
pub struct DbArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: DbCommands,
}

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Create missing tables and indexes
    Migrate,
    /// Replace all data with the demo users (Kyle, Sally) and posts
    Seed,
}

/// Priority: flag/env > config.toml > error
pub fn resolve_database_url(flag: Option<String>, config: Option<&BlogConfig>) -> Result<String> {
    flag.or_else(|| config.and_then(|c| c.server.database_url.clone()))
        .context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, ~/.blogctl/.env \
             or [server].database_url in ~/.blogctl/config.toml",
        )
}

pub async fn run_db(args: DbArgs) -> Result<()> {
    let config = BlogConfig::load_optional()?;
    let database_url = resolve_database_url(args.database_url, config.as_ref())?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    // Seeding needs the tables, so both commands migrate first
    ui::with_spinner_async("Running migrations", "Schema up to date", migrations::run(&pool))
        .await
        .context("Migration failed")?;

    if let DbCommands::Seed = args.command {
        let report = ui::with_spinner_async("Seeding database", "Database seeded", seed::run(&pool))
            .await
            .context("Seeding failed")?;

        for (name, id) in &report.users {
            println!("user  {}  {}", id, name);
        }
        for (title, id) in &report.posts {
            println!("post  {}  {}", id, title);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogctl_core::ServerSection;

    #[test]
    fn database_url_precedence() {
        let config = BlogConfig {
            server: ServerSection {
                database_url: Some("postgres://config/blog".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let url = resolve_database_url(Some("postgres://flag/blog".into()), Some(&config)).unwrap();
        assert_eq!(url, "postgres://flag/blog");

        let url = resolve_database_url(None, Some(&config)).unwrap();
        assert_eq!(url, "postgres://config/blog");

        assert!(resolve_database_url(None, None).is_err());
    }
}
