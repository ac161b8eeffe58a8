//! Output rendering (diagnostic dump, usage text)

pub mod report;
pub mod usage;

pub use report::{render_settings, write_settings};
pub use usage::render_usage;
