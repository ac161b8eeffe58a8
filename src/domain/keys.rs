//! Environment variable names read and written by the resolver.

pub const APN_HOME: &str = "APN_HOME";
pub const DJANGO_BASE: &str = "DJANGO_BASE";
pub const DJANGO_APP: &str = "DJANGO_APP";
pub const DJANGO_ENVIRON: &str = "DJANGO_ENVIRON";
pub const DJANGO_VERBOSE: &str = "DJANGO_VERBOSE";
pub const NOT_WEB_MODE: &str = "NOT_WEB_MODE";
pub const DJANGO_READ_DOT_ENV_FILE: &str = "DJANGO_READ_DOT_ENV_FILE";
pub const RUN_AS_MOBILE: &str = "RUN_AS_MOBILE";
pub const DJANGO_NETWORK: &str = "DJANGO_NETWORK";
pub const SITE_ID: &str = "SITE_ID";
pub const SITE_UI: &str = "SITE_UI";
pub const SETTINGS_BASE: &str = "SETTINGS_BASE";
pub const DJANGO_SETTINGS_MODULE: &str = "DJANGO_SETTINGS_MODULE";
pub const DJANGO_SETTINGS_CLASS: &str = "DJANGO_SETTINGS_CLASS";

/// Ask the loader to drop settings an IDE runner loaded before us.
pub const PYCHARM_RUNNER: &str = "PYCHARM_RUNNER";
pub const CLASS_SETTINGS_RESET: &str = "CLASS_SETTINGS_RESET";

/// Module search list the project root is prepended to.
pub const PYTHONPATH: &str = "PYTHONPATH";

/// Explicit tool configuration file.
pub const DJANGO_SETUP_CONFIG: &str = "DJANGO_SETUP_CONFIG";
/// Raise the tool's own log level to DEBUG.
pub const DJANGO_SETUP_DEBUG: &str = "DJANGO_SETUP_DEBUG";
/// Interpreter asked whether the class settings module is importable.
pub const DJANGO_SETUP_PYTHON: &str = "DJANGO_SETUP_PYTHON";
/// Program name the exported settings were resolved for.
pub const DJANGO_SETUP_PROGRAM: &str = "DJANGO_SETUP_PROGRAM";

/// Joins module path and class name in `DJANGO_SETTINGS_MODULE`.
pub const LOCATOR_SEPARATOR: char = ':';
