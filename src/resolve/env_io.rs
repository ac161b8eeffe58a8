//! Reading settings out of, and writing them back into, the environment.

use crate::domain::{keys, Field, ResolvedSettings};
use crate::env::{encode_bool, Environment};

/// Fallbacks for fields missing from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefaults {
    pub network: String,
    pub environ: String,
}

impl Default for SeedDefaults {
    fn default() -> Self {
        Self {
            network: crate::domain::DEFAULT_NETWORK.to_string(),
            environ: crate::domain::DEFAULT_ENVIRON.to_string(),
        }
    }
}

/// Build the initial settings from the environment.
pub fn seed<E: Environment + ?Sized>(env: &E, defaults: &SeedDefaults) -> ResolvedSettings {
    ResolvedSettings {
        env: non_empty(env.var(keys::DJANGO_ENVIRON)).unwrap_or_else(|| defaults.environ.clone()),
        verbose: env.bool_or(keys::DJANGO_VERBOSE, false),
        noweb: env.bool_or(keys::NOT_WEB_MODE, false),
        dotenv: env.bool(keys::DJANGO_READ_DOT_ENV_FILE),
        mobile: env.bool_or(keys::RUN_AS_MOBILE, false),
        network: non_empty(env.var(keys::DJANGO_NETWORK))
            .unwrap_or_else(|| defaults.network.clone()),
        site_id: env.int(keys::SITE_ID).filter(|id| *id != 0),
        site_ui: env.int(keys::SITE_UI).filter(|ui| *ui != 0),
    }
}

/// Whether `env` already holds a resolution exported for `program`.
///
/// Such an environment is complete: re-applying the implied presets to it
/// would undo flags given on the earlier run.
pub fn resolved_for<E: Environment + ?Sized>(env: &E, program: &str) -> bool {
    env.var(keys::DJANGO_SETUP_PROGRAM).is_some_and(|marker| marker == program)
}

/// Write every resolved field back under its fixed variable name.
pub fn export<E: Environment + ?Sized>(env: &mut E, settings: &ResolvedSettings) {
    for field in Field::ALL {
        env.export(field.env_key(), encode(field, settings));
    }
}

/// Record that the environment now holds the resolution for `program`.
pub fn mark_resolved<E: Environment + ?Sized>(env: &mut E, program: &str) {
    env.set_var(keys::DJANGO_SETUP_PROGRAM, program);
}

/// Environment encoding of one field; `None` means the variable is removed.
pub fn encode(field: Field, settings: &ResolvedSettings) -> Option<String> {
    match field {
        Field::Env => Some(settings.env.clone()),
        Field::Network => Some(settings.network.clone()),
        Field::Verbose => Some(encode_bool(settings.verbose)),
        Field::Noweb => Some(encode_bool(settings.noweb)),
        Field::Mobile => Some(encode_bool(settings.mobile)),
        Field::Dotenv => settings.dotenv.map(encode_bool),
        Field::SiteId => settings.site_id.map(|id| id.to_string()),
        Field::SiteUi => settings.site_ui.map(|ui| ui.to_string()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
