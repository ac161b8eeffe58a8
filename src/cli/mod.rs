//! Command-line entry point
//!
//! `django-setup [options] command [args...]`: resolve settings for the
//! process environment, then run `command` with them. Without a command the
//! resolved settings are printed instead, once: to stderr under `-v`, else
//! to stdout.

use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::bootstrap;
use crate::config::{load_config, ClassSettingsMode, SetupConfig};
use crate::domain::keys;
use crate::env::{Environment, ProcessEnv};
use crate::launch::{CommandLauncher, SettingsLoader};
use crate::locator::{
    module_prefix, resolve_locator, Availability, ClassSettingsProbe, InterpreterProbe,
    SearchPathProbe,
};
use crate::presets::PresetTable;
use crate::render::write_settings;
use crate::resolve::{Outcome, Resolver};
use crate::utils::program_name;

pub fn run() -> Result<ExitCode> {
    let mut env = ProcessEnv;
    init_tracing(env.bool_or(keys::DJANGO_SETUP_DEBUG, false));

    let mut argv = std::env::args();
    let program = program_name(&argv.next().unwrap_or_default());
    let args: Vec<String> = argv.collect();

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config_path = env.var(keys::DJANGO_SETUP_CONFIG).map(PathBuf::from);
    let config = load_config(&cwd, config_path.as_deref())?;

    bootstrap::init(&mut env, &cwd, &config.django_app)?;

    let presets = PresetTable::with_overrides(&config.presets);
    let outcome = Resolver::new(&presets)
        .with_defaults(config.seed_defaults())
        .resolve(&mut env, &program, &args)?;

    let resolution = match outcome {
        Outcome::Help(usage) => {
            print!("{}", usage);
            return Ok(ExitCode::SUCCESS);
        }
        Outcome::Resolved(resolution) => resolution,
    };

    let prefix = module_prefix(&env, &config.settings_base);
    let probe = class_settings_probe(&config, &env);
    let located = resolve_locator(&resolution.settings, &prefix, &mut env, probe.as_ref());
    let locator = located.locator.to_string();

    if resolution.settings.verbose {
        write_settings(&mut io::stderr().lock(), &resolution.settings, &locator)?;
        // Reloading children would otherwise print the dump again.
        env.set_var(keys::DJANGO_VERBOSE, "0");
    }

    if resolution.remainder.is_empty() {
        if !resolution.settings.verbose {
            write_settings(&mut io::stdout().lock(), &resolution.settings, &locator)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let code = CommandLauncher.load(&located, &resolution.remainder)?;
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

fn class_settings_probe(config: &SetupConfig, env: &ProcessEnv) -> Box<dyn ClassSettingsProbe> {
    match config.class_settings {
        ClassSettingsMode::On => Box::new(Availability::Available),
        ClassSettingsMode::Off => Box::new(Availability::Unavailable),
        ClassSettingsMode::Auto => {
            let module = config.class_settings_module.clone();
            let python = env.get_or(keys::DJANGO_SETUP_PYTHON, &config.python);
            Box::new((
                SearchPathProbe::from_env(env, module.clone()),
                InterpreterProbe::new(python, module),
            ))
        }
    }
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
