use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, StitchResult};

/// Manifest file inside every project (`pxt.json`).
pub const PROJECT_MANIFEST: &str = "pxt.json";
/// Entry file of a program; its statements go last in the wrapper.
pub const ENTRY_FILE: &str = "main.ts";
pub const IMAGES_FILE: &str = "images.g.ts";
pub const TILEMAP_FILE: &str = "tilemap.g.ts";
pub const TILEMAP_RESOURCES: &str = "tilemap.g.jres";

/// One line of the game list: where the game lives and who made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub url: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameList {
    pub games: Vec<GameEntry>,
}

impl GameList {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StitchResult<GameList> {
        let display = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            ConfigError::in_file(format!("read game list: {}", e), "stitch.project.games".into(), &display)
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ConfigError::in_file(format!("parse game list: {}", e), "stitch.project.games".into(), &display).into()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptVersions {
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub commits: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub pxt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMetaInfo {
    #[serde(default)]
    pub versions: ScriptVersions,
}

/// Metadata the hosting service reports for a shared script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub editor: String,
    #[serde(default)]
    pub meta: ScriptMetaInfo,
}

/// The parsed `pxt.json` of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub dependencies: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub palette: Option<Vec<String>>,
}

impl ProjectConfig {
    pub fn parse(raw: &str) -> Result<ProjectConfig, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// One fetched game, immutable once retrieved.
#[derive(Debug, Clone)]
pub struct SourceProject {
    pub url: String,
    pub author: String,
    pub meta: ScriptMeta,
    pub text: HashMap<String, String>,
    pub config: ProjectConfig,
}

impl SourceProject {
    pub fn new(entry: &GameEntry, meta: ScriptMeta, text: HashMap<String, String>, config: ProjectConfig) -> Self {
        SourceProject {
            url: entry.url.clone(),
            author: entry.author.clone(),
            meta,
            text,
            config,
        }
    }

    pub fn file(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Listed TypeScript sources, in manifest order.
    pub fn script_files(&self) -> impl Iterator<Item = &str> {
        self.config
            .files
            .iter()
            .map(String::as_str)
            .filter(|f| f.ends_with(".ts"))
    }

    pub fn palette(&self) -> &[String] {
        self.config.palette.as_deref().unwrap_or(&[])
    }
}

impl std::fmt::Display for SourceProject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Project: {} by {} ({})", self.meta.name, self.author, self.url)
    }
}
