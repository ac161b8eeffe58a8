//! Settings locator resolution
//!
//! Derives which settings definition to load from the resolved network. When a
//! class-based settings mechanism is installed the locator also names a class,
//! and a `module:Class` value that mechanism already committed to
//! `DJANGO_SETTINGS_MODULE` takes priority over the derived one.

use crate::domain::{keys, ResolvedSettings, SettingsLocator};
use crate::env::Environment;
use crate::utils::text::{is_identifier, title_case};

pub mod probe;

pub use probe::{Availability, ClassSettingsProbe, InterpreterProbe, SearchPathProbe};

/// Final locator plus loader hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorResolution {
    pub locator: SettingsLocator,
    /// Settings loaded before this run (e.g. by an IDE runner) must be discarded.
    pub reset_loaded: bool,
}

/// `SETTINGS_BASE` from the environment, else `fallback`.
pub fn module_prefix<E: Environment + ?Sized>(env: &E, fallback: &str) -> String {
    env.var(keys::SETTINGS_BASE).filter(|v| !v.is_empty()).unwrap_or_else(|| fallback.to_string())
}

pub fn default_module_path(prefix: &str, network: &str) -> String {
    if network.is_empty() {
        prefix.to_string()
    } else {
        format!("{}.{}", prefix, network)
    }
}

pub fn default_class_name(network: &str) -> String {
    format!("{}Settings", title_case(network))
}

/// Split a `module:Class` value on its last separator.
///
/// Returns `None` for plain module paths and for values whose class part is
/// not a valid identifier.
pub fn split_external(value: &str) -> Option<(String, String)> {
    let (module, class) = value.rsplit_once(keys::LOCATOR_SEPARATOR)?;
    if module.is_empty() || !is_identifier(class) {
        tracing::warn!("Ignoring malformed settings locator {:?}", value);
        return None;
    }
    Some((module.to_string(), class.to_string()))
}

/// Pure locator derivation.
pub fn derive_locator(
    network: &str,
    prefix: &str,
    external: Option<&str>,
    availability: Availability,
) -> SettingsLocator {
    let module_path = default_module_path(prefix, network);
    if availability == Availability::Unavailable {
        return SettingsLocator::module(module_path);
    }
    match external.and_then(split_external) {
        Some((module, class)) => SettingsLocator::with_class(module, class),
        None => SettingsLocator::with_class(module_path, default_class_name(network)),
    }
}

/// Derive the locator for `settings` and commit it to the environment.
///
/// Derived values are only set where absent; the chosen pair is then written
/// unconditionally. Without the class mechanism only the module default is set,
/// and the locator reports whichever module the environment ends up naming.
pub fn resolve_locator<E: Environment + ?Sized>(
    settings: &ResolvedSettings,
    prefix: &str,
    env: &mut E,
    probe: &dyn ClassSettingsProbe,
) -> LocatorResolution {
    let availability = probe.probe();
    let external = env.var(keys::DJANGO_SETTINGS_MODULE);
    let locator = derive_locator(&settings.network, prefix, external.as_deref(), availability);
    let default_module = default_module_path(prefix, &settings.network);

    if availability == Availability::Unavailable {
        env.set_default(keys::DJANGO_SETTINGS_MODULE, &default_module);
        let in_effect = env.var(keys::DJANGO_SETTINGS_MODULE).unwrap_or(default_module);
        tracing::debug!("class settings unavailable, using module {}", in_effect);
        let locator = SettingsLocator::module(in_effect);
        return LocatorResolution { locator, reset_loaded: false };
    }

    env.set_default(keys::DJANGO_SETTINGS_MODULE, &default_module);
    env.set_default(keys::DJANGO_SETTINGS_CLASS, &default_class_name(&settings.network));

    env.set_var(keys::DJANGO_SETTINGS_MODULE, &locator.module_path);
    if let Some(class) = &locator.class_name {
        env.set_var(keys::DJANGO_SETTINGS_CLASS, class);
    }

    let reset_loaded =
        env.bool_or(keys::PYCHARM_RUNNER, false) || env.bool_or(keys::CLASS_SETTINGS_RESET, false);
    tracing::debug!(locator = %locator, reset_loaded, "resolved settings locator");
    LocatorResolution { locator, reset_loaded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;

    fn settings(network: &str) -> ResolvedSettings {
        ResolvedSettings { network: network.to_string(), ..Default::default() }
    }

    #[test]
    fn test_default_paths() {
        assert_eq!(default_module_path("config.settings.sites", "bss"), "config.settings.sites.bss");
        assert_eq!(default_module_path("config.settings.sites", ""), "config.settings.sites");
        assert_eq!(default_class_name("bss"), "BssSettings");
        assert_eq!(default_class_name("my_net"), "My_NetSettings");
        assert_eq!(default_class_name(""), "Settings");
    }

    #[test]
    fn test_split_external() {
        assert_eq!(
            split_external("a.b.c:CSettings"),
            Some(("a.b.c".to_string(), "CSettings".to_string()))
        );
        assert_eq!(split_external("a:b:Klass"), Some(("a:b".to_string(), "Klass".to_string())));
        assert_eq!(split_external("a.b.c"), None);
        assert_eq!(split_external(":Klass"), None);
        assert_eq!(split_external("a.b:"), None);
        assert_eq!(split_external("a.b:9Bad"), None);
    }

    #[test]
    fn test_unavailable_mechanism_uses_plain_module() {
        let mut env = MemoryEnv::new();
        let r = resolve_locator(&settings("bss"), "tests.settings", &mut env, &Availability::Unavailable);
        assert_eq!(r.locator, SettingsLocator::module("tests.settings.bss"));
        assert_eq!(env.var(keys::DJANGO_SETTINGS_MODULE).as_deref(), Some("tests.settings.bss"));
        assert!(!env.contains(keys::DJANGO_SETTINGS_CLASS));
    }

    #[test]
    fn test_unavailable_mechanism_reports_existing_module() {
        let mut env = MemoryEnv::from_pairs([(keys::DJANGO_SETTINGS_MODULE, "custom.settings")]);
        let r = resolve_locator(&settings("bss"), "tests.settings", &mut env, &Availability::Unavailable);
        assert_eq!(r.locator, SettingsLocator::module("custom.settings"));
        assert_eq!(env.var(keys::DJANGO_SETTINGS_MODULE).as_deref(), Some("custom.settings"));
    }

    #[test]
    fn test_available_mechanism_derives_class() {
        let mut env = MemoryEnv::new();
        let r = resolve_locator(&settings("wl"), "config.settings.sites", &mut env, &Availability::Available);
        assert_eq!(r.locator.to_string(), "config.settings.sites.wl:WlSettings");
        assert_eq!(env.var(keys::DJANGO_SETTINGS_MODULE).as_deref(), Some("config.settings.sites.wl"));
        assert_eq!(env.var(keys::DJANGO_SETTINGS_CLASS).as_deref(), Some("WlSettings"));
        assert!(!r.reset_loaded);
    }

    #[test]
    fn test_external_combined_locator_wins() {
        let mut env = MemoryEnv::from_pairs([
            (keys::DJANGO_SETTINGS_MODULE, "other.settings:OtherSettings"),
            (keys::PYCHARM_RUNNER, "1"),
        ]);
        let r = resolve_locator(&settings("bss"), "config.settings.sites", &mut env, &Availability::Available);
        assert_eq!(r.locator, SettingsLocator::with_class("other.settings", "OtherSettings"));
        assert_eq!(env.var(keys::DJANGO_SETTINGS_MODULE).as_deref(), Some("other.settings"));
        assert_eq!(env.var(keys::DJANGO_SETTINGS_CLASS).as_deref(), Some("OtherSettings"));
        assert!(r.reset_loaded);
    }

    #[test]
    fn test_plain_external_module_is_replaced_when_available() {
        let mut env = MemoryEnv::from_pairs([
            (keys::DJANGO_SETTINGS_MODULE, "stale.settings"),
            (keys::DJANGO_SETTINGS_CLASS, "StaleSettings"),
        ]);
        let r = resolve_locator(&settings("bss"), "config.settings.sites", &mut env, &Availability::Available);
        assert_eq!(r.locator.to_string(), "config.settings.sites.bss:BssSettings");
        assert_eq!(env.var(keys::DJANGO_SETTINGS_CLASS).as_deref(), Some("BssSettings"));
    }

    #[test]
    fn test_module_prefix_from_environment() {
        let env = MemoryEnv::from_pairs([(keys::SETTINGS_BASE, "tests.settings")]);
        assert_eq!(module_prefix(&env, "config.settings.sites"), "tests.settings");
        assert_eq!(module_prefix(&MemoryEnv::new(), "config.settings.sites"), "config.settings.sites");
    }
}
