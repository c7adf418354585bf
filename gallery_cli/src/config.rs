use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use gallery_core::media::mime;
use gallery_core::{DiscoveryConfig, Feature};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, max_depth: Option<usize>) {
        if let Some(depth) = max_depth {
            self.discovery.max_depth = Some(depth);
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        // Check for XDG_CONFIG_HOME override first (Linux/macOS)
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("gallery/config.toml");
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gallery")
            .join("config.toml")
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("GALLERY_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        config
            .discovery
            .validate()
            .context("Invalid discovery configuration")?;

        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        Self::display_value(current)
            .ok_or_else(|| anyhow::anyhow!("Value at '{}' is not a simple type", key))
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.validate_config_value(key, value)?;

        // Load existing config or create new
        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, sections)) = parts.split_last() else {
            anyhow::bail!("Empty key");
        };

        // Navigate to the owning table, creating sections on the way
        let mut current = &mut config;
        for part in sections {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            current = table
                .entry(part.to_string())
                .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
        }

        let toml::Value::Table(table) = current else {
            anyhow::bail!("Cannot set value on non-table");
        };
        table.insert(last.to_string(), self.parse_config_value(key, value)?);

        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;
        log::debug!("Wrote {key} to {}", self.config_path.display());

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        if let toml::Value::Table(table) = value {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                Self::collect_values(val, new_prefix, items);
            }
        } else if let Some(display) = Self::display_value(value) {
            items.push((prefix, display));
        }
    }

    /// Render a leaf value; lists are comma separated
    fn display_value(value: &toml::Value) -> Option<String> {
        match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            toml::Value::Array(values) => values
                .iter()
                .map(Self::display_value)
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join(",")),
            _ => None,
        }
    }

    /// Validate a configuration value
    fn validate_config_value(&self, key: &str, value: &str) -> Result<()> {
        match key {
            "discovery.marker_name" => {
                let config = DiscoveryConfig {
                    marker_name: value.to_string(),
                    ..Default::default()
                };
                config.validate()?;
            }
            "discovery.max_depth" => {
                let _: usize = value
                    .parse()
                    .context("max_depth must be a non-negative integer")?;
            }
            "discovery.media_types" => {
                for mime_type in split_list(value) {
                    if !mime::is_well_formed(&mime::normalize(&mime_type)) {
                        anyhow::bail!("'{}' is not a MIME type", mime_type);
                    }
                }
            }
            "discovery.features" => {
                for name in split_list(value) {
                    name.parse::<Feature>()
                        .map_err(|_| anyhow::anyhow!("Unknown feature '{}'", name))?;
                }
            }
            "output.default_format" => {
                OutputFormat::from_string(value)?;
            }
            "output.color_enabled" | "output.progress_enabled" => {
                let _: bool = value.parse().context("Value must be 'true' or 'false'")?;
            }
            _ => {} // No validation for unknown keys
        }
        Ok(())
    }

    /// Parse a value to the appropriate TOML type
    fn parse_config_value(&self, key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "discovery.media_types" | "discovery.features" => Ok(toml::Value::Array(
                split_list(value)
                    .into_iter()
                    .map(toml::Value::String)
                    .collect(),
            )),
            k if k.ends_with("_depth") => {
                let num: i64 = value.parse().context("Expected integer value")?;
                Ok(toml::Value::Integer(num))
            }
            k if k.ends_with("_enabled") => {
                let bool_val: bool = value
                    .parse()
                    .context("Expected boolean value (true/false)")?;
                Ok(toml::Value::Boolean(bool_val))
            }
            // Force string types for these fields
            "discovery.marker_name" | "output.default_format" => {
                Ok(toml::Value::String(value.to_string()))
            }
            _ => {
                if let Ok(b) = value.parse::<bool>() {
                    Ok(toml::Value::Boolean(b))
                } else if let Ok(i) = value.parse::<i64>() {
                    Ok(toml::Value::Integer(i))
                } else if let Ok(f) = value.parse::<f64>() {
                    Ok(toml::Value::Float(f))
                } else {
                    Ok(toml::Value::String(value.to_string()))
                }
            }
        }
    }
}

/// Split a comma separated list, dropping empty items
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
