//! Small shared helpers.

pub mod paths;
pub mod text;

pub use paths::{prepend_search_path, program_name};
pub use text::{is_identifier, title_case};
