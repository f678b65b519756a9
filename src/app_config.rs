use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default source language code (ISO 639-1)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Default target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Longest input accepted, in characters
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// History database file; the platform data directory is used when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Provider chain, in priority order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    MyMemory,
    LibreTranslate,
}

impl ProviderKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MyMemory => "MyMemory",
            Self::LibreTranslate => "LibreTranslate",
        }
    }

    pub fn default_endpoint(&self) -> String {
        match self {
            Self::MyMemory => "https://api.mymemory.translated.net".to_string(),
            Self::LibreTranslate => "https://libretranslate.de".to_string(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MyMemory => write!(f, "mymemory"),
            Self::LibreTranslate => write!(f, "libretranslate"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mymemory" => Ok(Self::MyMemory),
            "libretranslate" => Ok(Self::LibreTranslate),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// One entry in the provider chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(rename = "type")]
    pub kind: ProviderKind,

    /// Base URL of the service
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Disabled entries are skipped when the chain is built
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            endpoint: kind.default_endpoint(),
            enabled: true,
            connect_timeout_secs: default_timeout_secs(),
            read_timeout_secs: default_timeout_secs(),
        }
    }

    /// Configured endpoint, or the provider's public one when blank
    pub fn effective_endpoint(&self) -> String {
        if self.endpoint.trim().is_empty() {
            self.kind.default_endpoint()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "ru".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_max_input_chars() -> usize {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(ProviderKind::MyMemory),
        ProviderConfig::new(ProviderKind::LibreTranslate),
    ]
}

impl Config {
    /// Load the configuration at `path`, writing a default one first if it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        if self.max_input_chars == 0 {
            return Err(anyhow!("max_input_chars must be greater than zero"));
        }

        let enabled: Vec<&ProviderConfig> = self.enabled_providers().collect();
        if enabled.is_empty() {
            return Err(anyhow!("At least one translation provider must be enabled"));
        }

        for provider in enabled {
            if provider.connect_timeout_secs == 0 || provider.read_timeout_secs == 0 {
                return Err(anyhow!("Timeouts for provider {} must be non-zero", provider.kind));
            }
            Url::parse(&provider.effective_endpoint())
                .with_context(|| format!("Invalid endpoint for provider {}", provider.kind))?;
        }

        Ok(())
    }

    /// Enabled providers in chain order
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    /// Database path to use, falling back to the platform data directory
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => crate::database::DatabaseConnection::default_database_path(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            max_input_chars: default_max_input_chars(),
            database_path: None,
            providers: default_providers(),
            log_level: LogLevel::default(),
        }
    }
}
