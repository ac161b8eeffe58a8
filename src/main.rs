//! django-setup: run a command with resolved Django site settings.

use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    django_setup::cli::run()
}
