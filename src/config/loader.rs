//! Config file loading

use super::SetupConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Section name honoured when the settings are nested in a shared file.
const SECTION: &str = "django-setup";

/// Load the tool configuration.
///
/// An explicit `config_path` must parse; an auto-discovered file in `dir` that
/// fails to parse only logs a warning and yields the defaults.
pub fn load_config(dir: &Path, config_path: Option<&Path>) -> Result<SetupConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(dir),
    };

    let Some(config_file) = discovered else {
        return Ok(SetupConfig::default());
    };

    let parsed = read_config(&config_file);
    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to load auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(SetupConfig::default())
        }
    }
}

fn read_config(config_file: &Path) -> Result<SetupConfig> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file),
        "yaml" | "yml" => parse_yaml_config(&content, config_file),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}

/// Parse TOML config, supporting a nested `[django-setup]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<SetupConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `django-setup` section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<SetupConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None if raw.is_null() => return Ok(SetupConfig::default()),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(dir: &Path) -> Option<PathBuf> {
    let candidates =
        ["django-setup.toml", ".django-setup.toml", "django-setup.yml", "django-setup.yaml"];

    candidates.iter().map(|candidate| dir.join(candidate)).find(|path| path.is_file())
}
