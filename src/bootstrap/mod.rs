//! Project layout discovery
//!
//! Works out where the Django project lives before any settings are resolved:
//! `APN_HOME` (default: parent of the working directory), `DJANGO_BASE`
//! (default: `APN_HOME`) and `DJANGO_APP` (default: `code`).

use std::path::{Path, PathBuf};

use crate::domain::keys;
use crate::env::Environment;
use crate::error::{Result, SetupError};
use crate::utils::prepend_search_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub apn_home: PathBuf,
    /// Canonical project base directory.
    pub django_base: PathBuf,
    /// `django_base/django_app`, prepended to `PYTHONPATH`.
    pub django_root: PathBuf,
}

/// Resolve the layout, put the project root on `PYTHONPATH` and export `APN_HOME`.
pub fn init<E: Environment + ?Sized>(
    env: &mut E,
    cwd: &Path,
    default_app: &str,
) -> Result<ProjectLayout> {
    let apn_home = env
        .var(keys::APN_HOME)
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.parent().unwrap_or(cwd).to_path_buf());

    let base = env.var(keys::DJANGO_BASE).map(PathBuf::from).unwrap_or_else(|| apn_home.clone());
    let django_base = base
        .canonicalize()
        .map_err(|source| SetupError::Bootstrap { path: base.clone(), source })?;

    let django_app = env.get_or(keys::DJANGO_APP, default_app);
    let django_root = django_base.join(django_app);
    prepend_search_path(env, keys::PYTHONPATH, &django_root);

    env.set_var(keys::APN_HOME, &apn_home.to_string_lossy());
    tracing::debug!(
        apn_home = %apn_home.display(),
        django_root = %django_root.display(),
        "project layout"
    );

    Ok(ProjectLayout { apn_home, django_base, django_root })
}
