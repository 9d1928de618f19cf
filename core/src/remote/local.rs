//! file: core/src/remote/local.rs
//! description: project retrieval from a directory on disk.
//!
//! Each game lives in `<root>/<project id>/` with the same files the hosting
//! service would return (`pxt.json`, `main.ts`, ...). Used for offline runs
//! and for tests.

use async_trait::async_trait;
use glob::{glob, Pattern};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::StitchConfig;
use crate::error::StitchResult;
use crate::project::{GameEntry, ProjectConfig, ScriptMeta, SourceProject, PROJECT_MANIFEST};
use crate::remote::err::RetrievalError;
use crate::remote::source::ProjectSource;

pub struct LocalProjectSource {
    root: PathBuf,
    config: StitchConfig,
}

impl LocalProjectSource {
    pub fn new(root: PathBuf, config: &StitchConfig) -> Self {
        Self { root, config: config.clone() }
    }

    fn read_dir(&self, dir: &Path) -> Result<HashMap<String, String>, String> {
        let pattern = format!("{}/*", Pattern::escape(&dir.display().to_string()));
        let mut text = HashMap::new();
        for entry in glob(&pattern).map_err(|e| format!("glob {}: {}", pattern, e))? {
            let path = entry.map_err(|e| format!("read dir entry: {}", e))?;
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            let content = std::fs::read_to_string(&path).map_err(|e| format!("read {}: {}", path.display(), e))?;
            text.insert(name, content);
        }
        Ok(text)
    }
}

#[async_trait]
impl ProjectSource for LocalProjectSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch(&self, entry: &GameEntry) -> StitchResult<SourceProject> {
        let id = self.config.project_id(&entry.url);
        let dir = self.root.join(id);
        debug!("reading {} ({})", dir.display(), entry.author);

        let issuer = "stitch.remote.local.fetch".to_string();
        if !dir.is_dir() {
            return Err(RetrievalError::new(format!("no project directory {}", dir.display()), issuer).into());
        }
        let text = self.read_dir(&dir).map_err(|e| RetrievalError::new(e, issuer.clone()))?;

        let raw = text.get(PROJECT_MANIFEST).ok_or_else(|| {
            RetrievalError::in_file(format!("project {} has no {}", id, PROJECT_MANIFEST), issuer.clone(), PROJECT_MANIFEST)
        })?;
        let config = ProjectConfig::parse(raw).map_err(|e| {
            RetrievalError::in_file(format!("project {}: {}", id, e), issuer.clone(), PROJECT_MANIFEST)
        })?;

        let meta = ScriptMeta {
            id: id.to_string(),
            name: id.to_string(),
            ..ScriptMeta::default()
        };
        Ok(SourceProject::new(entry, meta, text, config))
    }
}
