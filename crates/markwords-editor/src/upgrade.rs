//! Content-version upgrades.
//!
//! Each migration brings parameters from the previous version to the one it
//! is registered under. Upgrading walks every migration newer than the
//! content's version, in order.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::UpgradeError;

/// A `major.minor` content schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentVersion {
    pub major: u32,
    pub minor: u32,
}

impl ContentVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ContentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ContentVersion {
    type Err = UpgradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UpgradeError::InvalidVersion(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(ContentVersion {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

type Migration = fn(&mut Map<String, Value>);

const MIGRATIONS: &[(ContentVersion, Migration)] =
    &[(ContentVersion::new(1, 1), move_behaviour_settings)];

/// The newest content version this crate can produce.
pub fn latest_version() -> ContentVersion {
    MIGRATIONS
        .iter()
        .map(|(version, _)| *version)
        .max()
        .unwrap_or(ContentVersion::new(1, 0))
}

/// Upgrade parameters written for `from` to the latest version.
pub fn upgrade_content(from: ContentVersion, mut params: Value) -> Result<Value, UpgradeError> {
    let object = params.as_object_mut().ok_or(UpgradeError::NotAnObject)?;

    for (version, migrate) in MIGRATIONS {
        if *version > from {
            tracing::info!("upgrading content {from} -> {version}");
            migrate(object);
        }
    }

    Ok(params)
}

/// 1.1: behavioural settings moved into the `behaviour` group.
fn move_behaviour_settings(params: &mut Map<String, Value>) {
    let mut behaviour = match params.remove("behaviour") {
        Some(Value::Object(existing)) => existing,
        _ => Map::new(),
    };
    for key in ["enableRetry", "enableSolutionsButton"] {
        if let Some(value) = params.remove(key) {
            behaviour.insert(key.to_string(), value);
        }
    }
    params.insert("behaviour".to_string(), Value::Object(behaviour));
}
