//! markwords-report — Telemetry and report output for Mark the Words.
//!
//! Produces xAPI "answered" statements and self-contained HTML snapshots
//! of an exercise, configured from a TOML report configuration.

pub mod config;
pub mod html;
pub mod xapi;

pub use config::{load_config_from, ReportConfig};
pub use html::{generate_html, write_html_snapshot};
pub use xapi::{answered_statement, write_xapi_statement};
