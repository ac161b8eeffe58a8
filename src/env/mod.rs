//! Typed access to environment variables.
//!
//! The resolver and locator never touch `std::env` directly; they receive an
//! [`Environment`] so tests can run against [`MemoryEnv`] while the binary
//! uses [`ProcessEnv`].

pub mod memory;
pub mod process;

pub use memory::MemoryEnv;
pub use process::ProcessEnv;

const TRUE_VALUES: [&str; 7] = ["1", "true", "yes", "y", "on", "t", "ok"];
const FALSE_VALUES: [&str; 7] = ["0", "false", "no", "n", "off", "f", ""];

/// Read/write key-value store with typed coercion helpers.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
    fn set_var(&mut self, key: &str, value: &str);
    fn remove_var(&mut self, key: &str);

    fn contains(&self, key: &str) -> bool {
        self.var(key).is_some()
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.to_string())
    }

    /// Tri-state boolean: `None` when absent or unrecognised.
    fn bool(&self, key: &str) -> Option<bool> {
        let raw = self.var(key)?;
        let value = parse_bool(&raw);
        if value.is_none() {
            tracing::warn!("Ignoring non-boolean value {:?} for {}", raw, key);
        }
        value
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        self.bool(key).unwrap_or(default)
    }

    fn int(&self, key: &str) -> Option<u32> {
        let raw = self.var(key)?;
        match raw.trim().parse::<u32>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring non-integer value {:?} for {}: {}", raw, key, e);
                None
            }
        }
    }

    /// Set `key` only when it is not already present.
    fn set_default(&mut self, key: &str, value: &str) {
        if !self.contains(key) {
            self.set_var(key, value);
        }
    }

    /// Write `value`, or remove the key when `value` is `None`.
    fn export(&mut self, key: &str, value: Option<String>) {
        match value {
            Some(v) => self.set_var(key, &v),
            None => self.remove_var(key),
        }
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    let lowered = raw.trim().to_ascii_lowercase();
    if TRUE_VALUES.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_VALUES.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub fn encode_bool(value: bool) -> String {
    let encoded = if value { "1" } else { "0" };
    encoded.to_string()
}
