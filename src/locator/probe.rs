//! Detecting the class-based settings mechanism.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::keys;
use crate::env::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
}

pub trait ClassSettingsProbe {
    fn probe(&self) -> Availability;
}

/// A fixed answer, e.g. from configuration.
impl ClassSettingsProbe for Availability {
    fn probe(&self) -> Availability {
        *self
    }
}

/// Looks for an importable module on a search path.
#[derive(Debug, Clone)]
pub struct SearchPathProbe {
    module: String,
    search_path: Vec<PathBuf>,
}

impl SearchPathProbe {
    pub fn new(module: impl Into<String>, search_path: Vec<PathBuf>) -> Self {
        Self { module: module.into(), search_path }
    }

    /// Search the entries of `PYTHONPATH`.
    pub fn from_env<E: Environment + ?Sized>(env: &E, module: impl Into<String>) -> Self {
        let search_path = env
            .var(keys::PYTHONPATH)
            .map(|raw| std::env::split_paths(&raw).filter(|p| !p.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        Self::new(module, search_path)
    }

    fn provides(&self, dir: &Path) -> bool {
        dir.join(&self.module).join("__init__.py").is_file()
            || dir.join(format!("{}.py", self.module)).is_file()
    }
}

impl ClassSettingsProbe for SearchPathProbe {
    fn probe(&self) -> Availability {
        if self.search_path.iter().any(|dir| self.provides(dir)) {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }
}

/// Asks an interpreter to import the module.
///
/// The child inherits the process environment, so a `PYTHONPATH` prepared by
/// bootstrap applies. An interpreter that cannot be started counts as
/// unavailable.
#[derive(Debug, Clone)]
pub struct InterpreterProbe {
    interpreter: String,
    module: String,
}

impl InterpreterProbe {
    pub fn new(interpreter: impl Into<String>, module: impl Into<String>) -> Self {
        Self { interpreter: interpreter.into(), module: module.into() }
    }
}

impl ClassSettingsProbe for InterpreterProbe {
    fn probe(&self) -> Availability {
        let status = Command::new(&self.interpreter)
            .arg("-c")
            .arg(format!("import {}", self.module))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => Availability::Available,
            Ok(_) => Availability::Unavailable,
            Err(err) => {
                tracing::debug!("cannot run {}: {}", self.interpreter, err);
                Availability::Unavailable
            }
        }
    }
}

/// Available when either probe says so; the second only runs if the first fails.
impl<A: ClassSettingsProbe, B: ClassSettingsProbe> ClassSettingsProbe for (A, B) {
    fn probe(&self) -> Availability {
        match self.0.probe() {
            Availability::Available => Availability::Available,
            Availability::Unavailable => self.1.probe(),
        }
    }
}
