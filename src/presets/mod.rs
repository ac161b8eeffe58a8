//! Network presets
//!
//! Each preset is a partial override of [`ResolvedSettings`]. Serving networks
//! carry a site and UI variant; non-serving networks only imply noweb mode.
//! The table itself does not know about that grouping.

use crate::domain::ResolvedSettings;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub site_id: Option<u32>,
    #[serde(default)]
    pub site_ui: Option<u32>,
    #[serde(default)]
    pub noweb: Option<bool>,
    #[serde(default)]
    pub mobile: Option<bool>,
}

impl Preset {
    fn site(network: &str, site_id: Option<u32>, site_ui: u32) -> Self {
        Self {
            network: Some(network.to_string()),
            site_id,
            site_ui: Some(site_ui),
            ..Default::default()
        }
    }

    fn noweb() -> Self {
        Self { noweb: Some(true), ..Default::default() }
    }

    /// Overwrite every field this preset sets.
    pub fn apply(&self, settings: &mut ResolvedSettings) {
        if let Some(network) = &self.network {
            settings.network = network.clone();
        }
        if let Some(site_id) = self.site_id {
            settings.site_id = Some(site_id);
        }
        if let Some(site_ui) = self.site_ui {
            settings.site_ui = Some(site_ui);
        }
        if let Some(noweb) = self.noweb {
            settings.noweb = noweb;
        }
        if let Some(mobile) = self.mobile {
            settings.mobile = mobile;
        }
    }
}

static BUILTIN_PRESETS: Lazy<BTreeMap<String, Preset>> = Lazy::new(|| {
    let mut table = BTreeMap::new();
    // Serving networks
    table.insert("bss".to_string(), Preset::site("bss", Some(96), 16));
    table.insert("mytributes".to_string(), Preset::site("mytributes", Some(94), 15));
    table.insert("wl".to_string(), Preset::site("wl", None, 14));
    table.insert(
        "wl_mobile".to_string(),
        Preset { mobile: Some(true), ..Preset::site("wl", None, 13) },
    );
    // Non-serving networks
    for name in ["default", "api", "apnshell", "apncore", "apnexec"] {
        table.insert(name.to_string(), Preset::noweb());
    }
    table.insert(
        "media".to_string(),
        Preset { network: Some("media".to_string()), ..Preset::noweb() },
    );
    table
});

/// Immutable mapping from preset name to [`Preset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTable {
    presets: BTreeMap<String, Preset>,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetTable {
    pub fn builtin() -> Self {
        Self { presets: BUILTIN_PRESETS.clone() }
    }

    /// Built-in presets plus `extra`; an extra entry replaces a built-in of the same name.
    pub fn with_overrides(extra: &BTreeMap<String, Preset>) -> Self {
        let mut table = Self::builtin();
        for (name, preset) in extra {
            table.presets.insert(name.clone(), preset.clone());
        }
        table
    }

    pub fn lookup(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.presets.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = PresetTable::builtin();
        let bss = table.lookup("bss").expect("bss preset");
        assert_eq!(bss.site_id, Some(96));
        assert_eq!(bss.site_ui, Some(16));
        assert_eq!(bss.network.as_deref(), Some("bss"));

        let mobile = table.lookup("wl_mobile").expect("wl_mobile preset");
        assert_eq!(mobile.network.as_deref(), Some("wl"));
        assert_eq!(mobile.mobile, Some(true));
        assert_eq!(mobile.site_ui, Some(13));

        assert_eq!(table.lookup("default").and_then(|p| p.noweb), Some(true));
        assert!(table.lookup("default").and_then(|p| p.network.clone()).is_none());
        assert!(table.lookup("nope").is_none());
    }

    #[test]
    fn test_names_are_sorted() {
        let table = PresetTable::builtin();
        let names: Vec<&str> = table.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_apply_overwrites_only_set_fields() {
        let preset = PresetTable::builtin().lookup("bss").cloned().expect("bss");
        let mut settings =
            ResolvedSettings { site_ui: Some(20), mobile: true, ..Default::default() };
        preset.apply(&mut settings);
        assert_eq!(settings.site_ui, Some(16));
        assert_eq!(settings.site_id, Some(96));
        assert_eq!(settings.network, "bss");
        assert!(settings.mobile);
    }

    #[test]
    fn test_overrides_replace_builtin() {
        let mut extra = BTreeMap::new();
        extra.insert("bss".to_string(), Preset { site_id: Some(1), ..Default::default() });
        extra.insert("staging".to_string(), Preset::noweb());
        let table = PresetTable::with_overrides(&extra);
        assert_eq!(table.lookup("bss").and_then(|p| p.site_id), Some(1));
        assert!(table.lookup("bss").and_then(|p| p.site_ui).is_none());
        assert!(table.lookup("staging").is_some());
        assert!(table.lookup("mytributes").is_some());
    }
}
