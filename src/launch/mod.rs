//! Handing the resolved settings to whatever loads them.
//!
//! Resolution never calls a loader itself; the binary picks one and passes it
//! the final locator together with the arguments left over after flag parsing.

use anyhow::{Context, Result};
use std::process::Command;

use crate::domain::keys;
use crate::locator::LocatorResolution;

pub trait SettingsLoader {
    /// Load settings and run `args`, returning the process exit code.
    fn load(&self, resolution: &LocatorResolution, args: &[String]) -> Result<i32>;
}

/// Runs the remaining arguments as a child process that inherits the
/// resolved environment. A reset request is passed on as
/// `CLASS_SETTINGS_RESET=1` so the child's loader drops stale settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLauncher;

impl SettingsLoader for CommandLauncher {
    fn load(&self, resolution: &LocatorResolution, args: &[String]) -> Result<i32> {
        let Some((program, rest)) = args.split_first() else {
            anyhow::bail!("No command given to run");
        };

        tracing::debug!(
            command = %program,
            locator = %resolution.locator,
            reset_loaded = resolution.reset_loaded,
            "launching"
        );
        let mut command = Command::new(program);
        command.args(rest);
        if resolution.reset_loaded {
            command.env(keys::CLASS_SETTINGS_RESET, "1");
        }
        let status = command.status().with_context(|| format!("Failed to run {}", program))?;

        // Terminated by a signal
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SettingsLocator;

    fn resolution() -> LocatorResolution {
        LocatorResolution { locator: SettingsLocator::module("a.b"), reset_loaded: false }
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_args_is_an_error() {
        assert!(CommandLauncher.load(&resolution(), &[]).is_err());
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let args = vec!["/definitely/not/a/real/program".to_string()];
        assert!(CommandLauncher.load(&resolution(), &args).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_reported() {
        let args = argv(&["sh", "-c", "exit 3"]);
        assert_eq!(CommandLauncher.load(&resolution(), &args).expect("run"), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_reset_request_reaches_child() {
        let reset = LocatorResolution { reset_loaded: true, ..resolution() };
        let args = argv(&["sh", "-c", "test \"$CLASS_SETTINGS_RESET\" = 1"]);
        assert_eq!(CommandLauncher.load(&reset, &args).expect("run"), 0);
    }
}
