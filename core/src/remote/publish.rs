//! file: core/src/remote/publish.rs
//! description: publication of a finished bundle as a shared project.
//!
//! The hosting service takes a JSON envelope whose `header` and `text`
//! fields are themselves JSON strings. A successful upload answers with a
//! `shortid`, which becomes the share link. There is no retry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::compose::Bundle;
use crate::config::{StitchConfig, TargetVersions};
use crate::error::StitchResult;
use crate::remote::err::PublicationError;
use crate::remote::run_blocking;

pub const TARGET: &str = "arcade";
pub const EDITOR: &str = "tsprj";

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Upload `bundle`, returning where it can be opened.
    async fn publish(&self, bundle: &Bundle) -> StitchResult<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMeta {
    pub versions: TargetVersions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHeader {
    pub name: String,
    pub meta: HeaderMeta,
    pub editor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_id: Option<String>,
    pub pub_current: bool,
    pub target: String,
    pub target_version: String,
    pub id: String,
    pub recent_use: i64,
    pub modification_time: i64,
    pub path: String,
    pub save_id: serde_json::Value,
    pub github_current: bool,
    pub pub_versions: Vec<String>,
}

/// Body of the share request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub id: String,
    pub name: String,
    pub target: String,
    pub target_version: String,
    pub description: String,
    pub editor: String,
    pub header: String,
    pub text: String,
    pub meta: HeaderMeta,
}

impl ShareRequest {
    pub fn new(bundle: &Bundle, config: &StitchConfig, id: Uuid, now: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        let meta = HeaderMeta { versions: config.versions.clone() };
        let header = ProjectHeader {
            name: config.project_name.clone(),
            meta: meta.clone(),
            editor: EDITOR.to_string(),
            pub_id: None,
            pub_current: false,
            target: TARGET.to_string(),
            target_version: config.versions.target.clone(),
            id: id.to_string(),
            recent_use: now.timestamp_millis(),
            modification_time: now.timestamp_millis(),
            path: config.project_name.clone(),
            save_id: serde_json::json!({}),
            github_current: false,
            pub_versions: Vec::new(),
        };

        Ok(ShareRequest {
            id: header.id.clone(),
            name: header.name.clone(),
            target: header.target.clone(),
            target_version: header.target_version.clone(),
            description: config.description.clone(),
            editor: header.editor.clone(),
            header: serde_json::to_string(&header)?,
            text: serde_json::to_string(&bundle.text)?,
            meta,
        })
    }

    /// A request with a new project id, stamped with the current time.
    pub fn fresh(bundle: &Bundle, config: &StitchConfig) -> Result<Self, serde_json::Error> {
        Self::new(bundle, config, Uuid::new_v4(), Utc::now())
    }
}

pub struct HttpPublisher {
    config: StitchConfig,
}

impl HttpPublisher {
    pub fn new(config: &StitchConfig) -> Self {
        Self { config: config.clone() }
    }
}

#[async_trait]
impl Publisher for HttpPublisher {
    async fn publish(&self, bundle: &Bundle) -> StitchResult<String> {
        let issuer = "stitch.remote.publish".to_string();
        let request = ShareRequest::fresh(bundle, &self.config)
            .map_err(|e| PublicationError::new(format!("serialize share request: {}", e), issuer.clone()))?;
        let body = serde_json::to_string(&request)
            .map_err(|e| PublicationError::new(format!("serialize share request: {}", e), issuer.clone()))?;

        let api_root = self.config.api_root.trim_end_matches('/').to_string();
        let url = format!("{}/api/scripts", api_root);
        info!("publishing {} files as {}", bundle.text.len(), request.id);

        let reply = run_blocking(move || {
            let response = ureq::post(&url)
                .set("Content-Type", "application/json")
                .send_string(&body)
                .map_err(|e| match e {
                    ureq::Error::Status(code, _) => format!("http POST {} returned {}", url, code),
                    other => format!("http POST {} failed: {}", url, other),
                })?;
            let text = response.into_string().map_err(|e| format!("read publish reply: {}", e))?;
            serde_json::from_str::<serde_json::Value>(&text).map_err(|e| format!("parse publish reply: {}", e))
        })
        .await
        .map_err(|e| PublicationError::new(e, issuer.clone()))?;

        let shortid = reply.get("shortid").and_then(|v| v.as_str()).ok_or_else(|| {
            PublicationError::new(format!("publish reply has no shortid: {}", reply), issuer.clone())
        })?;
        Ok(format!("{}/{}", api_root, shortid))
    }
}
