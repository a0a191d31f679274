//! HTTP server command
//!
//! Runs migrations, then serves the blog API until Ctrl+C/SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use blogctl_core::BlogConfig;
use blogctl_server::db::{create_pool_with_options, migrations, pool::DEFAULT_MAX_CONNECTIONS};
use blogctl_server::http::{run_server, ServerConfig, DEFAULT_LOGIN, DEFAULT_ORIGINS};
use clap::Parser;

use super::db::resolve_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "BLOGCTL_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Web client origin allowed by CORS (repeatable or comma-separated)
    #[arg(long = "client-url", env = "CLIENT_URL", value_delimiter = ',')]
    pub client_urls: Vec<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Name of the user every request acts as (default: Kyle)
    #[arg(long, env = "BLOGCTL_LOGIN_AS")]
    pub login_as: Option<String>,
}

/// Merge flags/env over the config file over built-in defaults.
fn server_config(args: &ServeArgs, config: Option<&BlogConfig>) -> Result<ServerConfig> {
    let section = config.map(|c| &c.server);
    let defaults = ServerConfig::default();

    let bind_addr = match (args.bind, section.and_then(|s| s.bind.as_deref())) {
        (Some(addr), _) => addr,
        (None, Some(raw)) => raw
            .parse()
            .with_context(|| format!("Invalid [server].bind address in config: {raw}"))?,
        (None, None) => defaults.bind_addr,
    };

    let allowed_origins = if !args.client_urls.is_empty() {
        args.client_urls.clone()
    } else {
        section
            .map(|s| s.client_urls.clone())
            .filter(|urls| !urls.is_empty())
            .unwrap_or_else(|| DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect())
    };

    let login_as = args
        .login_as
        .clone()
        .or_else(|| section.and_then(|s| s.login_as.clone()))
        .unwrap_or_else(|| DEFAULT_LOGIN.to_string());

    Ok(ServerConfig {
        bind_addr,
        allowed_origins,
        cors_permissive: args.cors_permissive,
        login_as,
    })
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = BlogConfig::load_optional()?;
    let database_url = resolve_database_url(args.database_url.clone(), config.as_ref())?;
    let server_config = server_config(&args, config.as_ref())?;

    let max_connections = config
        .as_ref()
        .and_then(|c| c.server.max_connections)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    tracing::info!("Starting blogctl server on {}", server_config.bind_addr);

    let pool = create_pool_with_options(&database_url, max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool).await.context("Migration failed")?;

    // Blocks until shutdown
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogctl_core::ServerSection;

    fn args() -> ServeArgs {
        ServeArgs {
            bind: None,
            database_url: None,
            client_urls: vec![],
            cors_permissive: false,
            login_as: None,
        }
    }

    #[test]
    fn defaults_without_config() {
        let config = server_config(&args(), None).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3030");
        assert_eq!(config.login_as, "Kyle");
        assert_eq!(config.allowed_origins, DEFAULT_ORIGINS);
    }

    #[test]
    fn config_file_fills_gaps() {
        let file = BlogConfig {
            server: ServerSection {
                bind: Some("0.0.0.0:8080".into()),
                client_urls: vec!["https://blog.example".into()],
                login_as: Some("Sally".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = server_config(&args(), Some(&file)).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.allowed_origins, vec!["https://blog.example"]);
        assert_eq!(config.login_as, "Sally");
    }

    #[test]
    fn flags_override_config_file() {
        let file = BlogConfig {
            server: ServerSection {
                bind: Some("0.0.0.0:8080".into()),
                login_as: Some("Sally".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut args = args();
        args.bind = Some("127.0.0.1:4000".parse().unwrap());
        args.login_as = Some("Kyle".into());

        let config = server_config(&args, Some(&file)).unwrap();
        assert_eq!(config.bind_addr.port(), 4000);
        assert_eq!(config.login_as, "Kyle");
    }

    #[test]
    fn invalid_config_bind_is_reported() {
        let file = BlogConfig {
            server: ServerSection {
                bind: Some("not-an-address".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = server_config(&args(), Some(&file)).unwrap_err();
        assert!(err.to_string().contains("not-an-address"));
    }
}
