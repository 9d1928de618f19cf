//! file: core/src/config.rs
//! description: run configuration for the stitcher.
//!
//! `StitchConfig` holds the fixed identifiers of a run: the bundle's
//! project name, the endpoints used for retrieval and publication, the
//! runtime library path and the dependency policy. Every field has a
//! default so a config file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, StitchResult};

/// Environment variable naming a config file when none is given explicitly.
pub const CONFIG_ENV_VAR: &str = "STITCH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetVersions {
    pub branch: String,
    pub tag: String,
    pub commits: String,
    pub target: String,
    pub pxt: String,
}

impl Default for TargetVersions {
    fn default() -> Self {
        TargetVersions {
            branch: "v1.12.30".to_string(),
            tag: "v1.12.30".to_string(),
            commits: "https://github.com/microsoft/pxt-arcade/commits/33228b1cc7e1bea3f728c26a6047bdef35fd2c09".to_string(),
            target: "1.12.30".to_string(),
            pxt: "8.5.41".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    pub project_name: String,
    pub description: String,
    /// Public share-link prefix stripped from game urls to get the project id.
    pub share_prefix: String,
    pub backend_endpoint: String,
    pub api_root: String,
    pub runtime_library: PathBuf,
    /// Dependencies injected ahead of anything the programs declare.
    pub builtin_dependencies: serde_json::Map<String, serde_json::Value>,
    /// Dependencies dropped from every program (provided by the runtime library).
    pub excluded_dependencies: Vec<String>,
    pub versions: TargetVersions,
}

impl Default for StitchConfig {
    fn default() -> Self {
        let mut builtin_dependencies = serde_json::Map::new();
        builtin_dependencies.insert(
            "Color Fading".to_string(),
            serde_json::Value::String("github:jwunderl/pxt-color#v0.2.3".to_string()),
        );

        StitchConfig {
            project_name: "Five Second Games Redux".to_string(),
            description: "The combined games from the five-second mini game jam!".to_string(),
            share_prefix: "https://arcade.makecode.com/".to_string(),
            backend_endpoint: "https://makecode.com/api".to_string(),
            api_root: "https://arcade.makecode.com".to_string(),
            runtime_library: PathBuf::from("assets/lib.ts"),
            builtin_dependencies,
            excluded_dependencies: vec!["arcade-five-second-game-lib".to_string()],
            versions: TargetVersions::default(),
        }
    }
}

impl StitchConfig {
    /// Load a config from a JSON file path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StitchResult<StitchConfig> {
        let display = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            ConfigError::in_file(format!("read config: {}", e), "stitch.config.load".into(), &display)
        })?;
        let config: StitchConfig = serde_json::from_str(&raw).map_err(|e| {
            ConfigError::in_file(format!("parse config: {}", e), "stitch.config.load".into(), &display)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config for a run: explicit path, then `STITCH_CONFIG`, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> StitchResult<StitchConfig> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(path.trim()),
            _ => Ok(StitchConfig::default()),
        }
    }

    pub fn validate(&self) -> StitchResult<()> {
        if self.project_name.trim().is_empty() {
            return Err(ConfigError::new("project name is empty".into(), "stitch.config.validate".into()).into());
        }
        for (field, value) in [
            ("backend_endpoint", &self.backend_endpoint),
            ("api_root", &self.api_root),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::new(format!("{} is empty", field), "stitch.config.validate".into()).into());
            }
        }
        Ok(())
    }

    /// Project id for a public share url, or the input unchanged when it
    /// does not carry the share prefix.
    pub fn project_id<'a>(&self, url: &'a str) -> &'a str {
        url.strip_prefix(self.share_prefix.as_str()).unwrap_or(url)
    }
}
