//! Command handlers - one module per subcommand.
//!
//! Each handler renders into a `String` so output can be checked without
//! capturing stdout; `execute_*` prints the rendered text.

pub mod config;
pub mod courses;
pub mod resolve;
pub mod selectors;

pub use config::{execute_config, render_settings};
pub use courses::{execute_course, execute_courses, render_course, render_courses};
pub use resolve::{execute_resolve, render_resolved};
pub use selectors::{execute_selectors, render_named, render_selector_index};
