use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Description of a service, handed to a backend's constructor.
///
/// Backends validate what they need; `options` is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Service name used for unit/job/program file names
    pub name: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Account the service runs as
    #[serde(default)]
    pub user_name: Option<String>,

    /// Program to run (defaults to the current executable)
    #[serde(default)]
    pub executable: Option<PathBuf>,

    #[serde(default)]
    pub arguments: Vec<String>,

    #[serde(default)]
    pub working_directory: Option<PathBuf>,

    #[serde(default)]
    pub chroot: Option<PathBuf>,

    /// `KEY=VALUE` entries
    #[serde(default)]
    pub environment: Vec<String>,

    /// Install for the invoking user instead of system-wide
    #[serde(default)]
    pub user_service: bool,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Display name, falling back to the service name
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Load a service config from YAML, JSON or TOML
pub fn load(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read service config: {}", path.display()))?;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "yaml" | "yml" => parse_yaml(&content),
        "json" => parse_json(&content),
        "toml" => parse_toml(&content),
        _ => parse_auto(&content),
    }
    .with_context(|| format!("Invalid service config: {}", path.display()))
}

pub fn parse_yaml(content: &str) -> Result<ServiceConfig> {
    serde_yaml::from_str(content).context("Failed to parse YAML service config")
}

pub fn parse_json(content: &str) -> Result<ServiceConfig> {
    serde_json::from_str(content).context("Failed to parse JSON service config")
}

pub fn parse_toml(content: &str) -> Result<ServiceConfig> {
    toml::from_str(content).context("Failed to parse TOML service config")
}

/// Guess the format from content: JSON if it looks like an object, then TOML, then YAML
pub fn parse_auto(content: &str) -> Result<ServiceConfig> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') {
        return parse_json(content);
    }

    if let Ok(config) = toml::from_str::<ServiceConfig>(content) {
        return Ok(config);
    }

    parse_yaml(content)
}
