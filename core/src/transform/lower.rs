//! Function-to-closure lowering.
//!
//! Top-level `function name(params) { ... }` statements are cut out of the
//! program body and re-emitted as `const name = (params) => { ... }` in a
//! separate block that the assembler places ahead of the body. Discovery
//! order is kept; nothing is reordered by dependency.

use crate::transform::err::UnbalancedScanError;
use crate::transform::rules;
use crate::transform::scanner::{match_block, Scanner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredFunction {
    pub name: String,
    pub parameters: String,
    /// Body text including its outer braces.
    pub body: String,
}

impl LoweredFunction {
    pub fn to_closure(&self) -> String {
        format!("const {} = {} => {}\n", self.name, self.parameters, self.body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lowered {
    pub functions: Vec<LoweredFunction>,
    /// The input with every lowered statement removed.
    pub remainder: String,
}

impl Lowered {
    pub fn function_block(&self) -> String {
        self.functions.iter().map(LoweredFunction::to_closure).collect()
    }
}

/// Lower every top-level function statement of `text`.
///
/// `file` only labels the error raised when a function body never closes.
pub fn lower_functions(text: &str, file: &str) -> Result<Lowered, UnbalancedScanError> {
    let mut lowered = Lowered::default();
    let mut scanner = Scanner::new(text);
    let mut copied_upto = 0;

    loop {
        if scanner.at_top_level() {
            let line_start = scanner.pos();
            let rest = &text[line_start..];
            let indent = rest.len() - rest.trim_start_matches([' ', '\t']).len();

            if let Some(head) = rules::parse_function_head(&rest[indent..]) {
                let what = format!("function '{}'", head.name);
                // braces in the parameter list (object types, destructuring) are not the body
                scanner.seek(line_start + indent + head.len - 1);
                let (open, end) = match_block(&mut scanner, text, file, &what)?;

                lowered.functions.push(LoweredFunction {
                    name: head.name.to_string(),
                    parameters: head.parameters.to_string(),
                    body: text[open..end].to_string(),
                });
                lowered.remainder.push_str(&text[copied_upto..line_start]);
                copied_upto = end;
            }
        }

        if !scanner.advance_line() {
            break;
        }
    }

    lowered.remainder.push_str(&text[copied_upto..]);
    Ok(lowered)
}
