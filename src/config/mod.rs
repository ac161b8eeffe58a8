//! Tool configuration
//!
//! Optional file that adjusts defaults and adds presets. Precedence for the
//! settings module prefix is `SETTINGS_BASE` > config file > built-in default.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::{DEFAULT_DJANGO_APP, DEFAULT_ENVIRON, DEFAULT_NETWORK, DEFAULT_SETTINGS_BASE};
use crate::presets::Preset;
use crate::resolve::SeedDefaults;

pub mod loader;

pub use loader::load_config;

/// How to decide whether class-based settings are available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassSettingsMode {
    /// Look for the module on `PYTHONPATH`, then ask the interpreter.
    #[default]
    Auto,
    On,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    pub settings_base: String,
    pub default_network: String,
    pub default_environ: String,
    pub django_app: String,
    pub class_settings: ClassSettingsMode,
    pub class_settings_module: String,
    /// Interpreter used to probe for the class settings module.
    pub python: String,
    /// Extra presets; an entry named like a built-in replaces it.
    pub presets: BTreeMap<String, Preset>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            settings_base: DEFAULT_SETTINGS_BASE.to_string(),
            default_network: DEFAULT_NETWORK.to_string(),
            default_environ: DEFAULT_ENVIRON.to_string(),
            django_app: DEFAULT_DJANGO_APP.to_string(),
            class_settings: ClassSettingsMode::Auto,
            class_settings_module: "class_settings".to_string(),
            python: "python3".to_string(),
            presets: BTreeMap::new(),
        }
    }
}

impl SetupConfig {
    pub fn seed_defaults(&self) -> SeedDefaults {
        SeedDefaults { network: self.default_network.clone(), environ: self.default_environ.clone() }
    }
}
