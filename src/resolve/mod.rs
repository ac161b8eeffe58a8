//! Settings resolution
//!
//! Merges environment defaults, network presets and command-line flags into a
//! single [`ResolvedSettings`]. ORDER MATTERS: the stages in [`STAGES`] run in
//! sequence and each may overwrite what an earlier one set.

use crate::domain::{ResolvedSettings, MOBILE_SUFFIX};
use crate::env::Environment;
use crate::error::{Result, SetupError};
use crate::options::{self, Flag, FlagEvent};
use crate::presets::PresetTable;
use crate::render::usage::render_usage;

pub mod env_io;

pub use env_io::{export, mark_resolved, resolved_for, seed, SeedDefaults};

/// One override layer of the resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Initial values from the environment, falling back to built-in defaults.
    Seed,
    /// Preset named after the invoked program.
    ProgramPreset,
    /// Preset named by the seeded network.
    EnvironmentPreset,
    /// Flags, in command-line order.
    CommandLine,
    /// A `_mobile` program-name suffix forces mobile mode.
    MobileSuffix,
    /// Web layout becomes mobile layout when running as mobile.
    MobileLayout,
    /// Resolved values and the program they were resolved for are written
    /// back to the environment.
    Export,
}

pub const STAGES: [Stage; 7] = [
    Stage::Seed,
    Stage::ProgramPreset,
    Stage::EnvironmentPreset,
    Stage::CommandLine,
    Stage::MobileSuffix,
    Stage::MobileLayout,
    Stage::Export,
];

/// Result of a resolution pass that did not stop for help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub settings: ResolvedSettings,
    /// Program name with any mobile suffix removed.
    pub program: String,
    /// Arguments left for the downstream command.
    pub remainder: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `-h` was given; the caller prints the usage text and exits 0.
    Help(String),
    Resolved(Resolution),
}

/// Mutable state carried between stages.
struct Pass {
    settings: ResolvedSettings,
    /// The environment already holds this program's resolution.
    resumed: bool,
    seeded_network: String,
    program: String,
    remainder: Vec<String>,
    warnings: Vec<String>,
}

pub struct Resolver<'a> {
    presets: &'a PresetTable,
    defaults: SeedDefaults,
}

impl<'a> Resolver<'a> {
    pub fn new(presets: &'a PresetTable) -> Self {
        Self { presets, defaults: SeedDefaults::default() }
    }

    pub fn with_defaults(mut self, defaults: SeedDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Run every stage against `env`, exporting the result back into it.
    ///
    /// Only a malformed numeric flag is an error; unknown arguments and
    /// unknown network names degrade to warnings and no-ops.
    pub fn resolve<E: Environment + ?Sized>(
        &self,
        env: &mut E,
        program: &str,
        args: &[String],
    ) -> Result<Outcome> {
        let mut pass = Pass {
            settings: ResolvedSettings::default(),
            resumed: false,
            seeded_network: String::new(),
            program: program.to_string(),
            remainder: Vec::new(),
            warnings: Vec::new(),
        };

        for stage in STAGES {
            tracing::debug!(?stage, "resolving");
            match stage {
                Stage::Seed => {
                    pass.settings = seed(env, &self.defaults);
                    pass.seeded_network = pass.settings.network.clone();
                    pass.resumed = resolved_for(env, program);
                }
                Stage::ProgramPreset | Stage::EnvironmentPreset if pass.resumed => {
                    tracing::debug!(?stage, "environment already resolved, skipping preset");
                }
                Stage::ProgramPreset => self.apply_implied(&mut pass.settings, program),
                Stage::EnvironmentPreset => {
                    let network = pass.seeded_network.clone();
                    self.apply_implied(&mut pass.settings, &network);
                }
                Stage::CommandLine => {
                    if let Some(usage) = self.apply_flags(&mut pass, args)? {
                        return Ok(Outcome::Help(usage));
                    }
                }
                Stage::MobileSuffix => {
                    if let Some(stripped) = pass.program.strip_suffix(MOBILE_SUFFIX) {
                        pass.program = stripped.to_string();
                        pass.settings.mobile = true;
                    }
                }
                Stage::MobileLayout => pass.settings.apply_mobile_layout(),
                Stage::Export => {
                    export(env, &pass.settings);
                    mark_resolved(env, program);
                }
            }
        }

        Ok(Outcome::Resolved(Resolution {
            settings: pass.settings,
            program: pass.program,
            remainder: pass.remainder,
            warnings: pass.warnings,
        }))
    }

    fn apply_implied(&self, settings: &mut ResolvedSettings, name: &str) {
        if let Some(preset) = self.presets.lookup(name) {
            tracing::debug!(preset = name, "applying preset");
            preset.apply(settings);
        }
    }

    /// Apply flags in order. Returns the usage text when `-h` is reached.
    fn apply_flags(&self, pass: &mut Pass, args: &[String]) -> Result<Option<String>> {
        let parsed = options::parse(args);
        for warning in &parsed.warnings {
            tracing::warn!("{}: warning: {}", pass.program, warning);
        }
        pass.warnings.extend(parsed.warnings);
        pass.remainder = parsed.remainder;

        for FlagEvent { flag, value } in parsed.events {
            let value = value.unwrap_or_default();
            let settings = &mut pass.settings;
            match flag {
                Flag::Help => {
                    return Ok(Some(render_usage(&pass.program, settings, self.presets)));
                }
                Flag::Verbose => settings.verbose = true,
                Flag::Dotenv => settings.dotenv = Some(true),
                Flag::Mobile => settings.mobile = true,
                Flag::Noweb => settings.noweb = true,
                Flag::Env => settings.env = value,
                Flag::SiteId => settings.site_id = parse_site(flag, &value)?,
                Flag::SiteUi => settings.site_ui = parse_site(flag, &value)?,
                Flag::Network => {
                    settings.network = if value.is_empty() {
                        self.defaults.network.clone()
                    } else {
                        value.clone()
                    };
                    if let Some(preset) = self.presets.lookup(&value) {
                        tracing::debug!(preset = %value, "applying preset from --network");
                        preset.apply(settings);
                    }
                }
            }
        }
        Ok(None)
    }
}

/// Parse a numeric site flag; zero means "no site".
fn parse_site(flag: Flag, value: &str) -> Result<Option<u32>> {
    let parsed = value.trim().parse::<u32>().map_err(|source| SetupError::MalformedFlagValue {
        flag: flag.long(),
        value: value.to_string(),
        source,
    })?;
    Ok(Some(parsed).filter(|v| *v != 0))
}
