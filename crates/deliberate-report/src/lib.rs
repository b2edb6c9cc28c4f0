//! deliberate-report: renders evaluations for sharing.
//!
//! The plain text rendering lives on `Evaluation`'s `Display` impl in
//! deliberate-core; this crate adds HTML, Markdown, and JSON output.

pub mod html;
pub mod json;
pub mod markdown;

pub use html::{generate_html, write_html_report};
pub use json::{to_json, write_json_report};
pub use markdown::to_markdown;
