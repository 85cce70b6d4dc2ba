//! markwords-editor — Authoring-time hooks.
//!
//! Computes the maximum score of authored content before it is saved and
//! upgrades content parameters written against older schema versions.

pub mod error;
pub mod presave;
pub mod upgrade;

pub use error::{PresaveError, UpgradeError};
pub use presave::{presave, PresaveResult};
pub use upgrade::{upgrade_content, ContentVersion};
