//! file: core/src/remote/http.rs
//! description: project retrieval from the hosting service's script API.
//!
//! A shared game is two GETs: `<backend>/<id>` for its metadata and
//! `<backend>/<id>/text` for the filename → text map. Both requests run on
//! worker threads so every game in a run downloads at the same time.

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::config::StitchConfig;
use crate::error::StitchResult;
use crate::project::{GameEntry, ProjectConfig, ScriptMeta, SourceProject, PROJECT_MANIFEST};
use crate::remote::err::RetrievalError;
use crate::remote::run_blocking;
use crate::remote::source::ProjectSource;

pub struct HttpProjectSource {
    config: StitchConfig,
}

impl HttpProjectSource {
    pub fn new(config: &StitchConfig) -> Self {
        Self { config: config.clone() }
    }
}

fn get_text(url: &str) -> Result<String, String> {
    let response = ureq::get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => format!("http GET {} returned {}", url, code),
        other => format!("http GET {} failed: {}", url, other),
    })?;
    response
        .into_string()
        .map_err(|e| format!("read body of {}: {}", url, e))
}

async fn get_json<T>(url: String) -> Result<T, String>
where
    T: DeserializeOwned + Send + 'static,
{
    run_blocking(move || {
        let body = get_text(&url)?;
        serde_json::from_str(&body).map_err(|e| format!("parse {}: {}", url, e))
    })
    .await
}

#[async_trait]
impl ProjectSource for HttpProjectSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, entry: &GameEntry) -> StitchResult<SourceProject> {
        let id = self.config.project_id(&entry.url);
        let backend = self.config.backend_endpoint.trim_end_matches('/');
        let meta_url = format!("{}/{}", backend, id);
        let text_url = format!("{}/{}/text", backend, id);
        debug!("fetching {} ({})", id, entry.author);

        let issuer = "stitch.remote.http.fetch".to_string();
        let (meta, text) = futures::try_join!(
            get_json::<ScriptMeta>(meta_url),
            get_json::<HashMap<String, String>>(text_url)
        )
        .map_err(|e| RetrievalError::new(e, issuer.clone()))?;

        let raw = text.get(PROJECT_MANIFEST).ok_or_else(|| {
            RetrievalError::in_file(format!("project {} has no {}", id, PROJECT_MANIFEST), issuer.clone(), PROJECT_MANIFEST)
        })?;
        let config = ProjectConfig::parse(raw).map_err(|e| {
            RetrievalError::in_file(format!("project {}: {}", id, e), issuer.clone(), PROJECT_MANIFEST)
        })?;

        Ok(SourceProject::new(entry, meta, text, config))
    }
}
