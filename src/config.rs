//! Assistant configuration
//!
//! Loaded from `~/.docbuddy/config.toml`, created with defaults on
//! first run. CLI flags override individual fields after loading. The
//! pipeline treats every value here as opaque: it passes model names,
//! chunk counts, and delays through to the collaborators without
//! interpreting them.

use crate::documents::ChunkingConfig;
use crate::pipeline::StrategyKind;
use crate::retrieval::SearchParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default)]
    pub retrieval: SearchParams,

    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelsConfig {
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 11434,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Preferred execution strategy
    pub strategy: StrategyKind,
    /// Pause between bulk generation calls, in milliseconds
    pub request_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            request_delay_ms: 1000,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;

        Ok(home.join(".docbuddy").join("config.toml"))
    }

    /// Base URL of the configured Ollama endpoint
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.ollama.host, self.ollama.port)
    }

    /// Configured delay between bulk generation calls
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.pipeline.request_delay_ms)
    }

    /// Model to use: explicit override, configured default, or the
    /// client's built-in default
    pub fn resolve_model(&self, override_model: Option<&str>) -> String {
        if let Some(model) = override_model {
            return model.to_string();
        }
        self.models
            .default
            .clone()
            .unwrap_or_else(|| crate::generation::ollama::DEFAULT_MODEL.to_string())
    }
}
