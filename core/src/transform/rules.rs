use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct SourceParser;

/// A top-level `let` line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStatement<'a> {
    pub name: &'a str,
    pub annotation: Option<&'a str>,
    pub initializer: Option<&'a str>,
}

/// Signature of a function statement, up to and including the opening brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHead<'a> {
    pub name: &'a str,
    pub parameters: &'a str,
    pub return_annotation: Option<&'a str>,
    /// Byte length of the signature; the body's `{` is the last byte.
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceHead<'a> {
    pub name: &'a str,
    /// Byte offset just past the namespace name.
    pub name_end: usize,
    /// Byte length through the opening brace.
    pub len: usize,
}

fn entry_pair(rule: Rule, text: &str) -> Option<pest::iterators::Pair<'_, Rule>> {
    SourceParser::parse(rule, text).ok()?.next()
}

/// Parses a single line (no trailing newline, leading blanks already removed).
pub fn parse_let(line: &str) -> Option<LetStatement<'_>> {
    let pair = entry_pair(Rule::let_statement, line)?;
    let mut stmt = LetStatement { name: "", annotation: None, initializer: None };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => stmt.name = inner.as_str(),
            Rule::type_annotation => stmt.annotation = Some(inner.as_str().trim()),
            Rule::initializer => stmt.initializer = Some(inner.as_str().trim()),
            _ => {}
        }
    }
    Some(stmt)
}

pub fn parse_function_head(text: &str) -> Option<FunctionHead<'_>> {
    let pair = entry_pair(Rule::function_head, text)?;
    let len = pair.as_span().end();
    let mut head = FunctionHead { name: "", parameters: "", return_annotation: None, len };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => head.name = inner.as_str(),
            Rule::parameters => head.parameters = inner.as_str(),
            Rule::return_annotation => head.return_annotation = Some(inner.as_str()[1..].trim()),
            _ => {}
        }
    }
    Some(head)
}

/// Name declared by an `export const` line, if the line is one.
pub fn parse_export_const(line: &str) -> Option<&str> {
    let pair = entry_pair(Rule::export_const, line)?;
    pair.into_inner()
        .find(|inner| inner.as_rule() == Rule::ident)
        .map(|inner| inner.as_str())
}

pub fn parse_namespace_head(text: &str) -> Option<NamespaceHead<'_>> {
    let pair = entry_pair(Rule::namespace_head, text)?;
    let len = pair.as_span().end();
    let ident = pair.into_inner().find(|inner| inner.as_rule() == Rule::ident)?;
    Some(NamespaceHead {
        name: ident.as_str(),
        name_end: ident.as_span().end(),
        len,
    })
}
