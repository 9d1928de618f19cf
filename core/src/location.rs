#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Location {
    /// The program file in which the location is found.
    pub file: String,
    /// The line number of the location (1-based).
    pub line: usize,
    /// The column number of the location (1-based, in characters).
    pub column: usize,
}

impl Location {
    /// Creates a new `Location`.
    pub fn new(file: String, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// Resolves a byte offset into `text` to a line/column pair.
    /// Offsets past the end clamp to the end of the text.
    pub fn from_offset(file: &str, text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let before = &text[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            file: file.to_string(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// The starting location of the span.
    pub start: Location,
    /// The ending location of the span.
    pub end: Location,
}

impl Span {
    /// Creates a new `Span` from two `Location`s.
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Span between two byte offsets of the same text.
    pub fn from_offsets(file: &str, text: &str, start: usize, end: usize) -> Self {
        Self {
            start: Location::from_offset(file, text, start),
            end: Location::from_offset(file, text, end),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
