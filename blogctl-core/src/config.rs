use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional config file for the blogctl server and client
///
/// Every field can also be given on the command line or through the
/// environment; those take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub client: ClientSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Address to bind, e.g. "127.0.0.1:3030"
    pub bind: Option<String>,
    /// PostgreSQL URL; `${DATABASE_URL}` style references are expanded
    pub database_url: Option<String>,
    /// Origins allowed by CORS (the web client)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub client_urls: Vec<String>,
    /// Name of the user every request is pinned to
    pub login_as: Option<String>,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSection {
    /// Base URL of a running blogctl server
    pub endpoint: Option<String>,
}

impl BlogConfig {
    /// Config directory: ~/.blogctl
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".blogctl")
    }

    /// Config file path: ~/.blogctl/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load ~/.blogctl/config.toml, failing if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            anyhow::bail!("Config not found at {:?}\n\nRun: blogctl config init", path);
        }
        Self::load_from(&path)
    }

    /// Load ~/.blogctl/config.toml if present.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_optional() -> Result<Option<Self>> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load and expand a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;
        config.expand_variables();

        Ok(config)
    }

    /// Write the config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(path, toml_str)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Starter config written by `blogctl config init`
    pub fn starter() -> Self {
        Self {
            server: ServerSection {
                bind: Some("127.0.0.1:3030".to_string()),
                database_url: Some("${DATABASE_URL}".to_string()),
                client_urls: vec!["http://localhost:3000".to_string()],
                login_as: Some("Kyle".to_string()),
                max_connections: None,
            },
            client: ClientSection {
                endpoint: Some("http://127.0.0.1:3030".to_string()),
            },
        }
    }

    fn expand_variables(&mut self) {
        let mut vars = HashMap::new();
        vars.insert("HOME".to_string(), env::var("HOME").unwrap_or_default());
        vars.insert(
            "DATABASE_URL".to_string(),
            env::var("DATABASE_URL").unwrap_or_default(),
        );

        if let Some(ref url) = self.server.database_url {
            let expanded = Self::expand_string(url, &vars);
            // An unset variable expands to nothing; treat that as "not configured".
            self.server.database_url = (!expanded.is_empty()).then_some(expanded);
        }
        if let Some(ref endpoint) = self.client.endpoint {
            self.client.endpoint = Some(Self::expand_string(endpoint, &vars));
        }
    }

    /// Expand ${var} references in a string
    fn expand_string(s: &str, vars: &HashMap<String, String>) -> String {
        let mut result = s.to_string();

        for (key, value) in vars {
            let pattern = format!("${{{}}}", key);
            result = result.replace(&pattern, value);
        }

        result
    }
}
