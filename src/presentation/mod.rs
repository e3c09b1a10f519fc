//! Presentation layer rendering reports for the terminal.

/// Text and JSON output.
pub mod output;

pub use output::{OutputFormat, render_reports, render_services};
