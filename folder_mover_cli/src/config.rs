use crate::paths;
use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use folder_mover_core::DEFAULT_FOLDER_ID_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `FOLDER_MOVER_ACCOUNT__REGION`
pub const ENV_PREFIX: &str = "FOLDER_MOVER_";

/// Region offered by `config init` when none is configured
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub replication: ReplicationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AccountConfig {
    /// Falls back to the account recorded in the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// When set, the snapshot must be for this region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReplicationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_folder_arn: Option<String>,
    #[serde(default)]
    pub excluded_folder_ids: Vec<String>,
    pub folder_id_prefix: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            destination_folder_arn: None,
            excluded_folder_ids: Vec::new(),
            folder_id_prefix: DEFAULT_FOLDER_ID_PREFIX.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

impl AppConfig {
    /// Snapshot file the offline backend reads and writes
    pub fn snapshot_path(&self) -> PathBuf {
        self.service
            .snapshot_path
            .clone()
            .unwrap_or_else(paths::default_snapshot_path)
    }

    /// Destination from the command line, else from configuration
    pub fn destination(&self, cli_destination: Option<String>) -> Result<String> {
        cli_destination
            .or_else(|| self.replication.destination_folder_arn.clone())
            .filter(|arn| !arn.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No destination folder. Pass --destination or set replication.destination_folder_arn"
                )
            })
    }

    /// Configured exclusions followed by the ones given on the command line
    pub fn excluded_folder_ids(&self, cli_excludes: Vec<String>) -> Vec<String> {
        let mut ids = self.replication.excluded_folder_ids.clone();
        ids.extend(cli_excludes);
        ids
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
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager for a specific file
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
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
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let value = Self::as_toml(&self.load()?)?;

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

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path).with_context(|| {
                format!("Failed to read {}", self.config_path.display())
            })?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, sections)) = parts.split_last() else {
            anyhow::bail!("Empty key");
        };

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

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let value = Self::as_toml(&self.load()?)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    fn as_toml(config: &AppConfig) -> Result<toml::Value> {
        let toml_string = toml::to_string(config)?;
        Ok(toml::from_str(&toml_string)?)
    }

    fn display_value(value: &toml::Value) -> Option<String> {
        match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            toml::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Self::display_value)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        }
    }

    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            other => {
                if let Some(display) = Self::display_value(other) {
                    items.push((prefix, display));
                }
            }
        }
    }

    /// Validate a configuration value
    fn validate_config_value(&self, key: &str, value: &str) -> Result<()> {
        match key {
            "account.account_id" => {
                if value.len() != 12 || !value.chars().all(|c| c.is_ascii_digit()) {
                    anyhow::bail!("account_id must be a 12-digit account number");
                }
            }
            "account.region" => {
                if value.trim().is_empty() {
                    anyhow::bail!("region must not be empty");
                }
            }
            "service.snapshot_path" => {
                if value.trim().is_empty() {
                    anyhow::bail!("snapshot_path must not be empty");
                }
            }
            "replication.destination_folder_arn" => {
                if !value.starts_with("arn:") || !value.contains(":folder/") {
                    anyhow::bail!("destination_folder_arn must be a folder ARN (arn:...:folder/<id>)");
                }
            }
            "replication.folder_id_prefix" => {
                if value.chars().any(|c| matches!(c, ' ' | '[' | ']')) {
                    anyhow::bail!("folder_id_prefix must not contain spaces or brackets");
                }
            }
            "replication.excluded_folder_ids" => {}
            "output.color_enabled" | "output.progress_enabled" => {
                let _: bool = value.parse().context("Value must be 'true' or 'false'")?;
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// Parse a configuration value to the appropriate TOML type
    fn parse_config_value(&self, key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "output.color_enabled" | "output.progress_enabled" => {
                Ok(toml::Value::Boolean(value.parse()?))
            }
            "replication.excluded_folder_ids" => Ok(toml::Value::Array(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(|id| toml::Value::String(id.to_string()))
                    .collect(),
            )),
            _ => Ok(toml::Value::String(value.to_string())),
        }
    }
}

/// Interactive setup wizard for account, snapshot and destination
pub fn interactive_init(manager: &mut ConfigManager, force: bool) -> Result<()> {
    println!("{}", "folder-mover Setup".bold());
    println!("{}", "==================".bold());
    println!();

    let current = manager.load().ok();
    let configured = current
        .as_ref()
        .is_some_and(|c| c.replication.destination_folder_arn.is_some());

    if !force && configured {
        let reconfigure = Confirm::new()
            .with_prompt("Configuration already exists. Reconfigure?")
            .default(false)
            .interact()
            .context("Failed to read input")?;

        if !reconfigure {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let defaults = current.unwrap_or_default();

    println!("{}", "Account".bold());
    let mut account_prompt = Input::<String>::new()
        .with_prompt("Account id (12 digits)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.len() == 12 && input.chars().all(|c| c.is_ascii_digit()) {
                Ok(())
            } else {
                Err("Must be a 12-digit account number")
            }
        });
    if let Some(existing) = defaults.account.account_id.clone() {
        account_prompt = account_prompt.default(existing);
    }
    let account_id = account_prompt
        .interact_text()
        .context("Failed to read account id")?;

    let region: String = Input::new()
        .with_prompt("Region")
        .default(
            defaults
                .account
                .region
                .clone()
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        )
        .interact_text()
        .context("Failed to read region")?;

    println!();
    println!("{}", "Replication".bold());

    let snapshot_path: String = Input::new()
        .with_prompt("Account snapshot file")
        .default(defaults.snapshot_path().display().to_string())
        .interact_text()
        .context("Failed to read snapshot path")?;

    let mut destination_prompt = Input::<String>::new()
        .with_prompt("Destination folder ARN")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.starts_with("arn:") && input.contains(":folder/") {
                Ok(())
            } else {
                Err("Must be a folder ARN (arn:...:folder/<id>)")
            }
        });
    if let Some(existing) = defaults.replication.destination_folder_arn.clone() {
        destination_prompt = destination_prompt.default(existing);
    }
    let destination = destination_prompt
        .interact_text()
        .context("Failed to read destination folder ARN")?;

    let prefix: String = Input::new()
        .with_prompt("Prefix for new folder ids")
        .default(defaults.replication.folder_id_prefix.clone())
        .interact_text()
        .context("Failed to read folder id prefix")?;

    manager.set("account.account_id", &account_id)?;
    manager.set("account.region", &region)?;
    manager.set("service.snapshot_path", &snapshot_path)?;
    manager.set("replication.destination_folder_arn", &destination)?;
    manager.set("replication.folder_id_prefix", &prefix)?;

    println!();
    println!("{}", "✓ Configuration saved".green());
    println!("  {}", manager.get_config_path().display());
    println!();
    println!("You can now use:");
    println!("  folder-mover discover            - Export the folder trees");
    println!("  folder-mover migrate --dry-run   - Preview the replication");

    Ok(())
}
