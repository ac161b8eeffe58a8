//! Path helpers

use std::path::{Path, PathBuf};

use crate::env::Environment;

/// File name of `argv[0]`, used to select an implicit preset.
pub fn program_name(argv0: &str) -> String {
    Path::new(argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| argv0.to_string())
}

/// Put `dir` first on the search list stored in `key`, dropping any later copy.
pub fn prepend_search_path<E: Environment + ?Sized>(env: &mut E, key: &str, dir: &Path) {
    let existing = env.var(key).unwrap_or_default();
    let rest = std::env::split_paths(&existing)
        .filter(|p| !p.as_os_str().is_empty() && p.as_path() != dir);
    let entries: Vec<PathBuf> = std::iter::once(dir.to_path_buf()).chain(rest).collect();

    match std::env::join_paths(&entries) {
        Ok(joined) => env.set_var(key, &joined.to_string_lossy()),
        Err(e) => tracing::warn!("Cannot add {} to {}: {}", dir.display(), key, e),
    }
}
