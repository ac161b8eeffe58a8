//! Diagnostic settings dump.
//!
//! One `KEY=value` line per key, in a fixed order. Booleans render as
//! `True`/`False` and unset values as `None`.

use crate::domain::{keys, ResolvedSettings};
use std::fmt::Display;
use std::io::{self, Write};

/// Key under which the settings locator is reported.
pub const DJANGO_SETTINGS: &str = "DJANGO_SETTINGS";

const UNSET: &str = "None";

fn flag(value: bool) -> String {
    let rendered = if value { "True" } else { "False" };
    rendered.to_string()
}

fn or_unset<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNSET.to_string(), |v| v.to_string())
}

pub fn render_settings(settings: &ResolvedSettings, locator: &str) -> String {
    let lines = [
        (keys::SITE_ID, or_unset(settings.site_id)),
        (keys::SITE_UI, or_unset(settings.site_ui)),
        (keys::DJANGO_NETWORK, settings.network.clone()),
        (keys::DJANGO_ENVIRON, settings.env.clone()),
        (keys::DJANGO_READ_DOT_ENV_FILE, or_unset(settings.dotenv.map(flag))),
        (keys::NOT_WEB_MODE, flag(settings.noweb)),
        (keys::RUN_AS_MOBILE, flag(settings.mobile)),
        (DJANGO_SETTINGS, locator.to_string()),
    ];

    let mut out = String::new();
    for (key, value) in lines {
        out.push_str(key);
        out.push('=');
        out.push_str(&value);
        out.push('\n');
    }
    out
}

pub fn write_settings<W: Write>(
    out: &mut W,
    settings: &ResolvedSettings,
    locator: &str,
) -> io::Result<()> {
    out.write_all(render_settings(settings, locator).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_order_and_encoding() {
        let settings = ResolvedSettings {
            env: "localdev".to_string(),
            network: "bss".to_string(),
            noweb: true,
            site_id: Some(96),
            site_ui: Some(16),
            ..Default::default()
        };
        insta::assert_snapshot!(render_settings(&settings, "tests.settings.bss"), @r"
        SITE_ID=96
        SITE_UI=16
        DJANGO_NETWORK=bss
        DJANGO_ENVIRON=localdev
        DJANGO_READ_DOT_ENV_FILE=None
        NOT_WEB_MODE=True
        RUN_AS_MOBILE=False
        DJANGO_SETTINGS=tests.settings.bss
        ");
    }

    #[test]
    fn test_dump_unset_sites_and_explicit_dotenv() {
        let settings = ResolvedSettings { dotenv: Some(false), mobile: true, ..Default::default() };
        let text = render_settings(&settings, "config.settings.sites.default:DefaultSettings");
        assert!(text.starts_with("SITE_ID=None\nSITE_UI=None\n"));
        assert!(text.contains("DJANGO_READ_DOT_ENV_FILE=False\n"));
        assert!(text.contains("RUN_AS_MOBILE=True\n"));
        assert!(text.ends_with("DJANGO_SETTINGS=config.settings.sites.default:DefaultSettings\n"));
    }

    #[test]
    fn test_write_settings_to_buffer() {
        let mut buf = Vec::new();
        write_settings(&mut buf, &ResolvedSettings::default(), "a.b").expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), 8);
        assert!(text.ends_with('\n'));
    }
}
