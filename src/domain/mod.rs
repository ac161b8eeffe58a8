//! Core domain types shared by the resolver, locator and reporter.

use std::fmt;

pub mod keys;

pub const DEFAULT_NETWORK: &str = "default";
pub const DEFAULT_ENVIRON: &str = "localdev";
pub const DEFAULT_SETTINGS_BASE: &str = "config.settings.sites";
pub const DEFAULT_DJANGO_APP: &str = "code";

/// Program-name suffix that forces mobile rendering.
pub const MOBILE_SUFFIX: &str = "_mobile";

/// UI variant used by the web layout.
pub const WEB_LAYOUT_UI: u32 = 14;
/// UI variant substituted for [`WEB_LAYOUT_UI`] when running as mobile.
pub const MOBILE_LAYOUT_UI: u32 = 13;

/// Fully merged settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub env: String,
    pub verbose: bool,
    pub noweb: bool,
    /// Tri-state: `None` means "not specified", which is distinct from `Some(false)`.
    pub dotenv: Option<bool>,
    pub mobile: bool,
    pub network: String,
    pub site_id: Option<u32>,
    pub site_ui: Option<u32>,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            env: DEFAULT_ENVIRON.to_string(),
            verbose: false,
            noweb: false,
            dotenv: None,
            mobile: false,
            network: DEFAULT_NETWORK.to_string(),
            site_id: None,
            site_ui: None,
        }
    }
}

impl ResolvedSettings {
    /// Swap the web layout for the mobile layout when running as mobile.
    ///
    /// Idempotent; the resolver applies it once, after every override.
    pub fn apply_mobile_layout(&mut self) {
        if self.mobile && self.site_ui == Some(WEB_LAYOUT_UI) {
            self.site_ui = Some(MOBILE_LAYOUT_UI);
        }
    }
}

/// Individually addressable fields of [`ResolvedSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Env,
    Verbose,
    Noweb,
    Dotenv,
    Mobile,
    Network,
    SiteId,
    SiteUi,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Env,
        Field::Verbose,
        Field::Noweb,
        Field::Dotenv,
        Field::Mobile,
        Field::Network,
        Field::SiteId,
        Field::SiteUi,
    ];

    /// Environment variable the field is seeded from and exported to.
    pub fn env_key(self) -> &'static str {
        match self {
            Field::Env => keys::DJANGO_ENVIRON,
            Field::Verbose => keys::DJANGO_VERBOSE,
            Field::Noweb => keys::NOT_WEB_MODE,
            Field::Dotenv => keys::DJANGO_READ_DOT_ENV_FILE,
            Field::Mobile => keys::RUN_AS_MOBILE,
            Field::Network => keys::DJANGO_NETWORK,
            Field::SiteId => keys::SITE_ID,
            Field::SiteUi => keys::SITE_UI,
        }
    }
}

/// Which settings definition to load: a dotted module path and optional class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsLocator {
    pub module_path: String,
    pub class_name: Option<String>,
}

impl SettingsLocator {
    pub fn module(module_path: impl Into<String>) -> Self {
        Self { module_path: module_path.into(), class_name: None }
    }

    pub fn with_class(module_path: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self { module_path: module_path.into(), class_name: Some(class_name.into()) }
    }
}

impl fmt::Display for SettingsLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.class_name {
            Some(class) => write!(f, "{}{}{}", self.module_path, keys::LOCATOR_SEPARATOR, class),
            None => f.write_str(&self.module_path),
        }
    }
}
