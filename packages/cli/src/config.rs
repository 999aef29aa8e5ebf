use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "canvas.config.json";

/// Canvas configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding documents.json and templates.json
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Document opened when --doc is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_document: Option<String>,

    /// tracing filter directive, overridden by RUST_LOG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

fn default_store_dir() -> String {
    ".canvas".to_string()
}

impl Config {
    /// Load config from an explicit file, or from the working directory.
    ///
    /// A missing file in the working directory yields the defaults; a
    /// missing explicit file is an error.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file {} does not exist", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = cwd.join(DEFAULT_CONFIG_NAME);
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Cannot read {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config in {}", config_path.display()))?;
        Ok(config)
    }

    /// Get absolute path to the store directory
    pub fn store_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            default_document: None,
            log_filter: None,
        }
    }
}
