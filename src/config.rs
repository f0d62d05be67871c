use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::select::POLICY_NAMES;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_deck")]
    pub deck: String,
    #[serde(default = "default_policy")]
    pub policy: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_deck() -> String {
    "english-101".to_string()
}
fn default_policy() -> String {
    "weighted".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            deck: default_deck(),
            policy: default_policy(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordr")
            .join("config.toml")
    }

    /// Validate the policy name against known options, resetting to the
    /// default if stale. Call after deserialization.
    pub fn normalize_policy(&mut self) {
        if !POLICY_NAMES.contains(&self.policy.as_str()) {
            self.policy = default_policy();
        }
    }
}
