//! Tile resource renaming.
//!
//! Each game ships a generated `tilemap.g.ts` declaring its tiles inside the
//! shared `myTiles` namespace. Two games declaring the same tile name would
//! collide once bundled, so every tile is re-declared as `game<i>_<name>`
//! with its image payload moved to the bundle's resource catalog.

use log::warn;

pub const TILE_NAMESPACE: &str = "myTiles";
/// First line of the generated module's factory boilerplate.
pub const REGISTER_MARKER: &str = "_registerFactory";

#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    pub old_id: String,
    pub new_id: String,
    /// Catalog entry for the tile; `None` when the program's resource file
    /// has no entry under `old_id`.
    pub payload: Option<serde_json::Value>,
}

/// Globally unique id for a tile of program `index`.
pub fn tile_id(index: usize, old_id: &str) -> String {
    format!("game{}_{}", index, old_id)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenamedTiles {
    pub records: Vec<TileRecord>,
    /// Re-declared `myTiles` namespace fragment for the bundle's tile source.
    pub declarations: String,
    /// Factory code after the marker, rewritten to the new ids.
    pub helpers: String,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Replace `needle` with `replacement` wherever it is not glued to a longer
/// identifier on either side.
pub fn replace_identifier(text: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return text.to_string();
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;

    for (at, _) in text.match_indices(needle) {
        if at < copied {
            continue;
        }
        let end = at + needle.len();
        let glued_before = at > 0 && is_ident_byte(bytes[at - 1]) && is_ident_byte(needle.as_bytes()[0]);
        let glued_after = end < bytes.len() && is_ident_byte(bytes[end]);
        if glued_before || glued_after {
            continue;
        }
        out.push_str(&text[copied..at]);
        out.push_str(replacement);
        copied = end;
    }

    out.push_str(&text[copied..]);
    out
}

impl RenamedTiles {
    /// Rewrite qualified `myTiles.<old>` references to the renamed tiles.
    pub fn rewrite_references(&self, text: &str) -> String {
        self.records.iter().fold(text.to_string(), |acc, tile| {
            replace_identifier(
                &acc,
                &format!("{}.{}", TILE_NAMESPACE, tile.old_id),
                &format!("{}.{}", TILE_NAMESPACE, tile.new_id),
            )
        })
    }

    /// Resource catalog entries contributed by this program.
    pub fn catalog_entries(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.records
            .iter()
            .filter_map(|tile| tile.payload.as_ref().map(|p| (tile.new_id.as_str(), p)))
    }
}

/// Rename the tiles declared in a program's tile module.
///
/// Lines up to the registration marker are re-emitted with every
/// `export const` replaced by a placeholder for the renamed tile. From the
/// marker on the file is kept as helper code, minus its column-0 closing
/// brace and comments, with references switched to the new ids.
pub fn rename_tiles(
    text: &str,
    index: usize,
    resources: Option<&serde_json::Map<String, serde_json::Value>>,
) -> RenamedTiles {
    let mut renamed = RenamedTiles::default();
    let lines: Vec<&str> = text.split('\n').collect();
    let mut marker = None;

    for (i, line) in lines.iter().enumerate() {
        if let Some(old_id) = super::rules::parse_export_const(line.trim_start()) {
            let new_id = tile_id(index, old_id);
            renamed.declarations.push_str(&format!(
                "    export const {} = image.ofBuffer(hex``);\n",
                new_id
            ));

            let payload = resources.and_then(|r| r.get(old_id)).cloned();
            if payload.is_none() {
                warn!("tile '{}' of game {} has no resource entry", old_id, index);
            }
            renamed.records.push(TileRecord { old_id: old_id.to_string(), new_id, payload });
        } else if line.contains(REGISTER_MARKER) {
            marker = Some(i);
            break;
        } else {
            renamed.declarations.push_str(line);
            renamed.declarations.push('\n');
        }
    }

    let Some(marker) = marker else {
        warn!("tile module of game {} has no registration marker", index);
        return renamed;
    };

    renamed.declarations.push_str("\n}\n");

    let helpers = lines[marker..]
        .iter()
        .filter(|l| !(l.starts_with('}') || l.starts_with("//")))
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    renamed.helpers = renamed.records.iter().fold(renamed.rewrite_references(&helpers), |acc, tile| {
        replace_identifier(
            &acc,
            &format!("return {}", tile.old_id),
            &format!("return {}.{}", TILE_NAMESPACE, tile.new_id),
        )
    });

    renamed
}
