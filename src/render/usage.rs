//! Usage text for `-h/--help`.
//!
//! Built with clap's builder from the option engine's table so the listed
//! flags always match what the parser accepts.

use clap::{Arg, ArgAction, Command};

use crate::domain::ResolvedSettings;
use crate::options::{Flag, OptionSpec, OPTIONS};
use crate::presets::PresetTable;

pub fn render_usage(program: &str, settings: &ResolvedSettings, presets: &PresetTable) -> String {
    let networks = presets.names().collect::<Vec<_>>().join(", ");

    let mut cmd = Command::new("django-setup")
        .bin_name(program.to_string())
        .about("Resolve site, network and environment settings, then run a command")
        .override_usage(format!("{program} [options] command [args...]"))
        .disable_help_flag(true)
        .disable_version_flag(true)
        .after_help(format!("Known networks: {networks}"));

    for spec in OPTIONS.iter() {
        cmd = cmd.arg(option_arg(spec, settings));
    }

    cmd.render_help().to_string()
}

fn option_arg(spec: &'static OptionSpec, settings: &ResolvedSettings) -> Arg {
    let help = match current_value(spec.flag, settings) {
        Some(current) => format!("{} (current: {})", spec.help, current),
        None => spec.help.to_string(),
    };
    let arg = Arg::new(spec.long).short(spec.short).long(spec.long).help(help);
    if spec.takes_value {
        arg.value_name("VALUE").action(ArgAction::Set)
    } else {
        arg.action(ArgAction::SetTrue)
    }
}

fn current_value(flag: Flag, settings: &ResolvedSettings) -> Option<String> {
    let unset = || "unset".to_string();
    match flag {
        Flag::Help | Flag::Mobile => None,
        Flag::Verbose => Some(settings.verbose.to_string()),
        Flag::Noweb => Some(settings.noweb.to_string()),
        Flag::Dotenv => Some(settings.dotenv.map_or_else(unset, |v| v.to_string())),
        Flag::Env => Some(settings.env.clone()),
        Flag::Network => Some(settings.network.clone()),
        Flag::SiteId => Some(settings.site_id.map_or_else(unset, |v| v.to_string())),
        Flag::SiteUi => Some(settings.site_ui.map_or_else(unset, |v| v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_flags_values_and_networks() {
        let settings = ResolvedSettings { env: "staging".to_string(), ..Default::default() };
        let text = render_usage("manage", &settings, &PresetTable::builtin());
        for spec in OPTIONS.iter() {
            assert!(text.contains(&format!("--{}", spec.long)), "missing --{}", spec.long);
        }
        assert!(text.contains("manage [options] command"));
        assert!(text.contains("staging"));
        for name in ["bss", "wl_mobile", "apnexec", "media"] {
            assert!(text.contains(name), "missing network {name}");
        }
    }
}
