//! django-setup: resolve Django site settings from the environment, network
//! presets and command-line flags.
//!
//! A resolution pass seeds [`domain::ResolvedSettings`] from environment
//! variables, applies the presets implied by the program name and the seeded
//! network, then the command-line flags, and finally exports the result back
//! into the environment. [`locator`] turns the resolved network into the
//! settings module (and class) to load.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod launch;
pub mod locator;
pub mod options;
pub mod presets;
pub mod render;
pub mod resolve;
pub mod utils;

pub use domain::{ResolvedSettings, SettingsLocator};
pub use error::{Result, SetupError};
pub use resolve::{Outcome, Resolution, Resolver};
