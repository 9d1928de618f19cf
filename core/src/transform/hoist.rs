//! Declaration hoisting.
//!
//! Every top-level `let` becomes a typed declaration in the wrapper's
//! declaration block plus a bare assignment left where the statement was,
//! so lowered closures placed ahead of the program body can still see it.

use crate::transform::rules;
use crate::transform::scanner::{line_comment_start, Scanner};

/// Type of a hoisted variable guessed from the shape of its initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    Number,
    Boolean,
    String,
    AnyArray,
    Unresolved,
}

impl LiteralType {
    pub fn infer(initializer: &str) -> LiteralType {
        let code = &initializer[..line_comment_start(initializer)];
        let value = code.trim().trim_end_matches(';').trim_end();
        if is_number_literal(value) {
            LiteralType::Number
        } else if value == "true" || value == "false" {
            LiteralType::Boolean
        } else if is_string_literal(value) {
            LiteralType::String
        } else if value.starts_with('[') {
            LiteralType::AnyArray
        } else {
            LiteralType::Unresolved
        }
    }

    pub fn annotation(&self) -> &'static str {
        match self {
            LiteralType::Number => "number",
            LiteralType::Boolean => "boolean",
            LiteralType::String => "string",
            LiteralType::AnyArray => "any[]",
            LiteralType::Unresolved => "any",
        }
    }
}

fn is_number_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    let starts_numeric = match digits.as_bytes() {
        [b'0'..=b'9', ..] => true,
        [b'.', b'0'..=b'9', ..] => true,
        _ => false,
    };
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        return !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    starts_numeric && digits.parse::<f64>().is_ok()
}

fn is_string_literal(value: &str) -> bool {
    ['"', '\''].iter().any(|&q| {
        value.len() >= 2
            && value.starts_with(q)
            && value.ends_with(q)
            && !value[1..value.len() - 1].contains(q)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Annotated(String),
    Inferred(LiteralType),
}

impl DeclaredType {
    pub fn annotation(&self) -> &str {
        match self {
            DeclaredType::Annotated(ty) => ty,
            DeclaredType::Inferred(ty) => ty.annotation(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub ty: DeclaredType,
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {}: {};", self.name, self.ty.annotation())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hoisted {
    pub declarations: Vec<Declaration>,
    pub body: String,
}

impl Hoisted {
    /// The declaration block, one statement per line.
    pub fn declaration_block(&self) -> String {
        self.declarations.iter().map(|d| format!("{}\n", d)).collect()
    }
}

/// Hoist the top-level `let` statements of one file.
///
/// Lines nested inside braces are left alone. Declarations are not checked
/// for uniqueness: a name declared twice is declared twice.
pub fn hoist_declarations(text: &str) -> Hoisted {
    let mut hoisted = Hoisted::default();
    let mut scanner = Scanner::new(text);
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let top_level = scanner.at_top_level();
        offset += line.len();
        scanner.seek(offset);

        let content = line.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim_start();
        let indent = &content[..content.len() - trimmed.len()];
        let (code, comment) = trimmed.split_at(line_comment_start(trimmed));
        let code = code.trim_end();

        let stmt = if top_level { rules::parse_let(code) } else { None };
        let Some(stmt) = stmt else {
            hoisted.body.push_str(line);
            continue;
        };

        let ty = match (stmt.annotation, stmt.initializer) {
            (Some(annotation), _) => DeclaredType::Annotated(annotation.to_string()),
            (None, Some(init)) => DeclaredType::Inferred(LiteralType::infer(init)),
            (None, None) => DeclaredType::Inferred(LiteralType::Unresolved),
        };
        hoisted.declarations.push(Declaration { name: stmt.name.to_string(), ty });

        if let Some(init) = stmt.initializer {
            let comment = if comment.is_empty() { String::new() } else { format!(" {}", comment) };
            hoisted.body.push_str(&format!("{}{} = {}{}\n", indent, stmt.name, init, comment));
        }
    }

    hoisted
}
