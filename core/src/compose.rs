//! file: core/src/compose.rs
//! description: cross-program merge and bundle layout.
//!
//! Programs are assembled independently; `Composition` then folds the
//! results in input order into the run-wide state (kind names, resource
//! catalog, registration calls) and `Bundle` lays that state out as the
//! files of the combined project.

use log::{info, warn};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::StitchConfig;
use crate::error::{FileError, StitchResult};
use crate::project::{SourceProject, PROJECT_MANIFEST};
use crate::transform::assemble::{assemble_module, AssembledModule, ModuleStats};
use crate::transform::kinds::{merge_unique, KindNames, SPRITE_KIND, STATUS_BAR_KIND};
use crate::transform::tiles::TILE_NAMESPACE;

pub const RESOURCE_MANIFEST: &str = "tilemap.jres";
pub const RESOURCE_SOURCE: &str = "tilemap.ts";
pub const KINDS_SOURCE: &str = "kinds.ts";
pub const RUNTIME_SOURCE: &str = "lib.ts";
pub const REGISTRATION_SOURCE: &str = "main.ts";

/// Per-program line of the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSummary {
    pub author: String,
    pub wrapper: String,
    pub file: String,
    pub stats: ModuleStats,
}

/// The finished multi-file project handed to the publisher.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Project files in manifest order.
    pub files: Vec<String>,
    pub text: BTreeMap<String, String>,
    pub resources: Map<String, Value>,
    pub kinds: KindNames,
    pub dependencies: Map<String, Value>,
    pub programs: Vec<ProgramSummary>,
}

impl Bundle {
    pub fn file(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Write every bundle file into `dir`, creating it if needed.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> StitchResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            FileError::new(format!("create output dir: {}", e), "stitch.compose.write".into(), &dir.display().to_string())
        })?;
        for (name, text) in &self.text {
            let path = dir.join(name);
            std::fs::write(&path, text).map_err(|e| {
                FileError::new(format!("write bundle file: {}", e), "stitch.compose.write".into(), &path.display().to_string())
            })?;
        }
        Ok(())
    }
}

/// Read the runtime library asset copied verbatim into every bundle.
pub fn load_runtime_library<P: AsRef<Path>>(path: P) -> StitchResult<String> {
    let display = path.as_ref().display().to_string();
    std::fs::read_to_string(&path).map_err(|e| {
        FileError::new(format!("read runtime library: {}", e), "stitch.compose.runtime".into(), &display).into()
    })
}

/// Merge the dependency maps of all programs.
///
/// Built-in dependencies come first; after that the first program to name a
/// dependency decides its version.
pub fn merge_dependencies(projects: &[SourceProject], config: &StitchConfig) -> Map<String, Value> {
    let mut merged = config.builtin_dependencies.clone();
    for project in projects {
        for (name, version) in &project.config.dependencies {
            if config.excluded_dependencies.iter().any(|d| d == name) {
                continue;
            }
            match merged.get(name) {
                None => {
                    merged.insert(name.clone(), version.clone());
                }
                Some(existing) if existing != version => {
                    warn!(
                        "dependency '{}': keeping {} over {} from {}",
                        name, existing, version, project.author
                    );
                }
                Some(_) => {}
            }
        }
    }
    merged
}

/// Run-wide state accumulated one program at a time, in input order.
#[derive(Debug, Default)]
pub struct Composition {
    kinds: KindNames,
    resources: Map<String, Value>,
    tile_source: String,
    registrations: String,
    modules: Vec<(String, String)>,
    programs: Vec<ProgramSummary>,
}

impl Composition {
    pub fn new() -> Self {
        let mut resources = Map::new();
        resources.insert(
            "*".to_string(),
            json!({
                "mimeType": "image/x-mkcd-f4",
                "dataEncoding": "base64",
                "namespace": TILE_NAMESPACE,
            }),
        );
        Composition { resources, ..Default::default() }
    }

    /// Fold one assembled program into the run.
    pub fn absorb(&mut self, module: AssembledModule) {
        let wrapper = module.wrapper_name();
        let file = module.file_name();

        for repeated in merge_unique(&mut self.kinds.sprite_kinds, &module.kinds.sprite_kinds) {
            info!("{}.{} already declared, reusing it for {}", SPRITE_KIND, repeated, wrapper);
        }
        for repeated in merge_unique(&mut self.kinds.status_bar_kinds, &module.kinds.status_bar_kinds) {
            info!("{}.{} already declared, reusing it for {}", STATUS_BAR_KIND, repeated, wrapper);
        }

        for tile in &module.tiles {
            if let Some(payload) = &tile.payload {
                if self.resources.contains_key(&tile.new_id) {
                    warn!("resource '{}' declared twice, keeping the first", tile.new_id);
                    continue;
                }
                self.resources.insert(tile.new_id.clone(), payload.clone());
            }
        }
        self.tile_source.push_str(&module.tile_source);

        // a JSON string literal is also a valid TypeScript one
        let author = Value::String(module.author.clone()).to_string();
        self.registrations
            .push_str(&format!("GameJam.registerGame({}, {});\n", author, wrapper));

        self.programs.push(ProgramSummary {
            author: module.author,
            wrapper,
            file: file.clone(),
            stats: module.stats,
        });
        self.modules.push((file, module.source));
    }

    /// Lay the accumulated state out as bundle files.
    pub fn finish(
        self,
        dependencies: Map<String, Value>,
        runtime_library: &str,
        config: &StitchConfig,
    ) -> StitchResult<Bundle> {
        let mut files = vec![
            RESOURCE_MANIFEST.to_string(),
            RESOURCE_SOURCE.to_string(),
            KINDS_SOURCE.to_string(),
            RUNTIME_SOURCE.to_string(),
        ];
        files.extend(self.modules.iter().map(|(name, _)| name.clone()));
        files.push(REGISTRATION_SOURCE.to_string());

        let manifest = json!({
            "name": config.project_name,
            "description": "",
            "dependencies": dependencies,
            "files": files,
            "preferredEditor": "tsprj",
        });

        let mut text = BTreeMap::new();
        text.insert(PROJECT_MANIFEST.to_string(), to_pretty_json(&manifest, PROJECT_MANIFEST)?);
        text.insert(RESOURCE_MANIFEST.to_string(), Value::Object(self.resources.clone()).to_string());
        text.insert(RESOURCE_SOURCE.to_string(), self.tile_source);
        text.insert(KINDS_SOURCE.to_string(), kinds_source(&self.kinds));
        text.insert(RUNTIME_SOURCE.to_string(), runtime_library.to_string());
        text.insert(REGISTRATION_SOURCE.to_string(), format!("{}GameJam.init();\n", self.registrations));
        for (name, source) in self.modules {
            text.insert(name, source);
        }

        Ok(Bundle {
            files,
            text,
            resources: self.resources,
            kinds: self.kinds,
            dependencies,
            programs: self.programs,
        })
    }
}

/// Pretty-print `value` with 4-space indentation, as the editor writes `pxt.json`.
fn to_pretty_json(value: &Value, file: &str) -> StitchResult<String> {
    let issuer = "stitch.compose.manifest";
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(value, &mut ser)
        .map_err(|e| FileError::new(format!("serialize: {}", e), issuer.into(), file))?;
    String::from_utf8(buf).map_err(|e| FileError::new(format!("serialize: {}", e), issuer.into(), file).into())
}

/// Generated source declaring the merged kind names.
pub fn kinds_source(kinds: &KindNames) -> String {
    let mut out = String::new();
    for (namespace, names) in [
        (SPRITE_KIND, &kinds.sprite_kinds),
        (STATUS_BAR_KIND, &kinds.status_bar_kinds),
    ] {
        out.push_str(&format!("namespace {} {{\n", namespace));
        for name in names {
            out.push_str(&format!("    export const {} = {}.create();\n", name, namespace));
        }
        out.push_str("}\n");
    }
    out
}

/// Assemble every program and merge the results into a bundle.
///
/// Assembly of each program is independent; the merge runs in input order so
/// the output only depends on the input.
pub fn compose(projects: &[SourceProject], runtime_library: &str, config: &StitchConfig) -> StitchResult<Bundle> {
    let modules = std::thread::scope(|scope| {
        let handles: Vec<_> = projects
            .iter()
            .enumerate()
            .map(|(index, project)| scope.spawn(move || assemble_module(project, index)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect::<StitchResult<Vec<_>>>()
    })?;

    let mut composition = Composition::new();
    for module in modules {
        composition.absorb(module);
    }

    let dependencies = merge_dependencies(projects, config);
    let bundle = composition.finish(dependencies, runtime_library, config)?;
    info!("composed {} programs into {} files", bundle.programs.len(), bundle.text.len());
    Ok(bundle)
}
