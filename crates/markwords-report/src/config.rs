//! Report configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for xAPI statements and HTML snapshots.
///
/// Note: Custom Debug impl masks the actor mailbox to keep learner addresses
/// out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Language tag for xAPI language maps.
    #[serde(default = "default_language")]
    pub language: String,
    /// Base URL that content ids are appended to, forming the activity id.
    #[serde(default = "default_activity_base")]
    pub activity_base: String,
    /// Learner name reported as the statement actor.
    #[serde(default)]
    pub actor_name: Option<String>,
    /// Learner mailbox; `mailto:` is added when missing.
    #[serde(default)]
    pub actor_mbox: Option<String>,
}

impl std::fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportConfig")
            .field("language", &self.language)
            .field("activity_base", &self.activity_base)
            .field("actor_name", &self.actor_name)
            .field("actor_mbox", &self.actor_mbox.as_ref().map(|_| "***"))
            .finish()
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_activity_base() -> String {
    "http://localhost/h5p/content".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            activity_base: default_activity_base(),
            actor_name: None,
            actor_mbox: None,
        }
    }
}

impl ReportConfig {
    /// Activity id for a piece of content.
    pub fn activity_id(&self, content_id: &str) -> String {
        format!("{}/{}", self.activity_base.trim_end_matches('/'), content_id)
    }

    fn resolved(self) -> Self {
        Self {
            language: resolve_env_vars(&self.language),
            activity_base: resolve_env_vars(&self.activity_base),
            actor_name: self.actor_name.as_deref().map(resolve_env_vars),
            actor_mbox: self.actor_mbox.as_deref().map(resolve_env_vars),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
    }
    result
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without a path:
/// 1. `markwords.toml` in the current directory
/// 2. `~/.config/markwords/config.toml`
///
/// `MARKWORDS_ACTOR_MBOX` overrides the actor mailbox.
pub fn load_config_from(path: Option<&Path>) -> Result<ReportConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("markwords.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading report config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ReportConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ReportConfig::default(),
    };

    if let Ok(mbox) = std::env::var("MARKWORDS_ACTOR_MBOX") {
        config.actor_mbox = Some(mbox);
    }

    Ok(config.resolved())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("markwords"))
}
