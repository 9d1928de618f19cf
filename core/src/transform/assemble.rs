//! Module assembly: one program in, one self-contained wrapper function out.

use log::{debug, info, warn};

use crate::error::StitchResult;
use crate::project::{SourceProject, ENTRY_FILE, IMAGES_FILE, TILEMAP_FILE, TILEMAP_RESOURCES};
use crate::transform::hoist::{hoist_declarations, Declaration};
use crate::transform::kinds::{extract_kinds, KindNames};
use crate::transform::lower::{lower_functions, LoweredFunction};
use crate::transform::rules;
use crate::transform::tiles::{rename_tiles, RenamedTiles, TileRecord};

const WRAPPER_INDENT: usize = 4;

/// Counts reported per program in the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleStats {
    pub declarations: usize,
    pub functions: usize,
    pub tiles: usize,
    pub sprite_kinds: usize,
    pub status_bar_kinds: usize,
}

/// Everything one program contributes to the bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledModule {
    pub index: usize,
    pub author: String,
    pub source: String,
    pub kinds: KindNames,
    pub tiles: Vec<TileRecord>,
    /// Fragment of the bundle's generated tile source.
    pub tile_source: String,
    pub stats: ModuleStats,
}

impl AssembledModule {
    pub fn wrapper_name(&self) -> String {
        wrapper_name(self.index)
    }

    pub fn file_name(&self) -> String {
        format!("{}.ts", self.wrapper_name())
    }
}

pub fn wrapper_name(index: usize) -> String {
    format!("game{}", index)
}

/// Indent every non-empty line of `text`.
pub fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.split('\n')
        .map(|l| if l.is_empty() { String::new() } else { format!("{}{}", pad, l) })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn palette_statements(palette: &[String]) -> String {
    palette
        .iter()
        .enumerate()
        .map(|(i, color)| format!("color.setColor({}, color.parseColorString(\"{}\"));\n", i, color))
        .collect()
}

/// Strip the `namespace myImages` header, leaving its body as a plain block.
fn unwrap_images(text: &str) -> String {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(head) = rules::parse_namespace_head(trimmed) {
            if head.name == "myImages" {
                let start = offset + indent;
                let rest = &text[start + head.name_end..];
                return format!("{}{}", &text[..start], rest.trim_start_matches([' ', '\t']));
            }
        }
        offset += line.len();
    }
    text.to_string()
}

#[derive(Default)]
struct Parts {
    declarations: Vec<Declaration>,
    functions: Vec<LoweredFunction>,
    body: String,
    entry: String,
}

/// Assemble program `index` into its wrapper function.
pub fn assemble_module(project: &SourceProject, index: usize) -> StitchResult<AssembledModule> {
    let resources = project
        .file(TILEMAP_RESOURCES)
        .and_then(|raw| match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => Some(map),
            _ => {
                warn!("game {}: {} is not a JSON object", index, TILEMAP_RESOURCES);
                None
            }
        });

    // the tile module goes first so other files can be pointed at the new ids
    let tiles = if project.script_files().any(|f| f == TILEMAP_FILE) {
        match project.file(TILEMAP_FILE) {
            Some(text) => rename_tiles(text, index, resources.as_ref()),
            None => RenamedTiles::default(),
        }
    } else {
        RenamedTiles::default()
    };

    let mut kinds = KindNames::default();
    let mut parts = Parts::default();

    for file in project.script_files() {
        if file == TILEMAP_FILE {
            continue;
        }
        let Some(text) = project.file(file) else {
            warn!("game {}: {} is listed but missing", index, file);
            continue;
        };
        debug!("game {}: transforming {}", index, file);

        let text = if file == IMAGES_FILE {
            unwrap_images(text)
        } else {
            let extracted = extract_kinds(text, file)?;
            kinds.merge(&extracted.names);

            let hoisted = hoist_declarations(&extracted.remainder);
            parts.declarations.extend(hoisted.declarations);

            let lowered = lower_functions(&hoisted.body, file)?;
            parts.functions.extend(lowered.functions);
            lowered.remainder
        };
        let text = tiles.rewrite_references(&text);

        if file == ENTRY_FILE {
            parts.entry = text;
        } else {
            parts.body.push_str(&text);
            parts.body.push('\n');
        }
    }

    let mut inner = String::new();
    if !tiles.helpers.is_empty() {
        inner.push_str(&tiles.helpers);
        inner.push('\n');
    }
    for declaration in &parts.declarations {
        inner.push_str(&format!("{}\n", declaration));
    }
    for function in &parts.functions {
        inner.push_str(&function.to_closure());
    }
    inner.push_str(&palette_statements(project.palette()));
    inner.push_str(&parts.body);
    inner.push_str(&parts.entry);

    let name = wrapper_name(index);
    let source = format!(
        "// written by {}\n// original link {}\nfunction {}() {{\n{}\n}}\n",
        project.author,
        project.url,
        name,
        indent(inner.trim_end(), WRAPPER_INDENT)
    );

    let stats = ModuleStats {
        declarations: parts.declarations.len(),
        functions: parts.functions.len(),
        tiles: tiles.records.len(),
        sprite_kinds: kinds.sprite_kinds.len(),
        status_bar_kinds: kinds.status_bar_kinds.len(),
    };
    info!(
        "assembled {} for {}: {} declarations, {} functions, {} tiles",
        name, project.author, stats.declarations, stats.functions, stats.tiles
    );

    Ok(AssembledModule {
        index,
        author: project.author.clone(),
        source,
        kinds,
        tiles: tiles.records,
        tile_source: tiles.declarations,
        stats,
    })
}
