// src/config.rs
//! Application configuration: optional config.yaml plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment_name: String,
    pub environment: EnvironmentConfig,
    pub enhance: EnhanceConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
    pub address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub api_version: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    local: Option<ConfigSection>,
    production: Option<ConfigSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigSection {
    environment: Option<EnvironmentOverlay>,
    enhance: Option<EnhanceConfig>,
}

/// Fields set in a file section; unset ones keep the environment's defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentOverlay {
    database_path: Option<PathBuf>,
    address: Option<String>,
    port: Option<u16>,
}

impl EnvironmentOverlay {
    fn apply(self, base: EnvironmentConfig) -> EnvironmentConfig {
        EnvironmentConfig {
            database_path: self.database_path.unwrap_or(base.database_path),
            address: self.address.unwrap_or(base.address),
            port: self.port.unwrap_or(base.port),
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/resume_builder.db"),
            address: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl EnvironmentConfig {
    fn production() -> Self {
        Self {
            database_path: PathBuf::from("/app/data/resume_builder.db"),
            address: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            api_key: None,
            api_version: "2023-06-01".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1000,
            timeout_seconds: 60,
        }
    }
}

impl ConfigManager {
    /// Load configuration for the current environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = Self::load_from_file(Path::new(CONFIG_FILE), &environment)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.environment.database_path = Self::resolve_path(&config.environment.database_path)?;

        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Defaults for `environment`, overlaid with its section of the file when present
    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            info!("{} not found, using defaults", path.display());
            return Self::from_yaml_str("{}", environment);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid configuration")?;

        let (section, default_environment) = match environment {
            "production" => (file.production, EnvironmentConfig::production()),
            _ => (file.local, EnvironmentConfig::default()),
        };
        let section = section.unwrap_or_default();

        Ok(Self {
            environment_name: environment.to_string(),
            environment: section
                .environment
                .unwrap_or_default()
                .apply(default_environment),
            enhance: section.enhance.unwrap_or_default(),
        })
    }

    /// Environment variables win over the file
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("RESUME_DB_PATH") {
            self.environment.database_path = PathBuf::from(path);
        }
        if let Some(address) = var("ROCKET_ADDRESS") {
            self.environment.address = address;
        }
        if let Some(port) = var("ROCKET_PORT") {
            self.environment.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }
        if let Some(key) = var("ENHANCE_API_KEY") {
            self.enhance.api_key = Some(key);
        }
        if let Some(url) = var("ENHANCE_API_URL") {
            self.enhance.api_url = url;
        }
        if let Some(model) = var("ENHANCE_MODEL") {
            self.enhance.model = model;
        }
        Ok(())
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}
