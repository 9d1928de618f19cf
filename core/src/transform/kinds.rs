//! Extraction of the `SpriteKind` and `StatusBarKind` namespaces.
//!
//! These blocks only declare identifiers (`export const X =
//! SpriteKind.create()`). They are stripped from program text and the names
//! are re-declared once for the whole bundle in a generated file.

use crate::transform::err::UnbalancedScanError;
use crate::transform::rules;
use crate::transform::scanner::{match_block, Scanner};

pub const SPRITE_KIND: &str = "SpriteKind";
pub const STATUS_BAR_KIND: &str = "StatusBarKind";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindNames {
    pub sprite_kinds: Vec<String>,
    pub status_bar_kinds: Vec<String>,
}

impl KindNames {
    /// Append `other`'s names, skipping any already present.
    pub fn merge(&mut self, other: &KindNames) {
        merge_unique(&mut self.sprite_kinds, &other.sprite_kinds);
        merge_unique(&mut self.status_bar_kinds, &other.status_bar_kinds);
    }

    pub fn is_empty(&self) -> bool {
        self.sprite_kinds.is_empty() && self.status_bar_kinds.is_empty()
    }
}

/// First-seen-wins union of `names` into `into`. Returns the names that
/// were already present.
pub fn merge_unique(into: &mut Vec<String>, names: &[String]) -> Vec<String> {
    let mut repeated = Vec::new();
    for name in names {
        if into.contains(name) {
            repeated.push(name.clone());
        } else {
            into.push(name.clone());
        }
    }
    repeated
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedKinds {
    pub names: KindNames,
    pub remainder: String,
}

/// Remove every top-level kind namespace from `text`, collecting the names
/// they export in order of appearance.
pub fn extract_kinds(text: &str, file: &str) -> Result<ExtractedKinds, UnbalancedScanError> {
    let mut extracted = ExtractedKinds::default();
    let mut scanner = Scanner::new(text);
    let mut copied_upto = 0;

    loop {
        if scanner.at_top_level() {
            let line_start = scanner.pos();
            let rest = &text[line_start..];
            let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();

            let head = rules::parse_namespace_head(&rest[indent..]);
            let target = match head.as_ref().map(|head| head.name) {
                Some(SPRITE_KIND) => Some(&mut extracted.names.sprite_kinds),
                Some(STATUS_BAR_KIND) => Some(&mut extracted.names.status_bar_kinds),
                _ => None,
            };

            if let (Some(target), Some(head)) = (target, head) {
                scanner.seek(line_start + indent + head.len - 1);
                let (open, end) = match_block(&mut scanner, text, file, "kind namespace")?;
                for line in text[open + 1..end - 1].lines() {
                    if let Some(name) = rules::parse_export_const(line.trim_start()) {
                        target.push(name.to_string());
                    }
                }
                extracted.remainder.push_str(&text[copied_upto..line_start]);
                copied_upto = end;
            }
        }

        if !scanner.advance_line() {
            break;
        }
    }

    extracted.remainder.push_str(&text[copied_upto..]);
    Ok(extracted)
}
