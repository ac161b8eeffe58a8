//! Error types for django-setup

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// A numeric flag was given a value that is not a number.
    #[error("invalid value '{value}' for --{flag}: {source}")]
    MalformedFlagValue {
        flag: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The project base directory could not be resolved.
    #[error("cannot resolve project base {}: {source}", .path.display())]
    Bootstrap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SetupError>;
