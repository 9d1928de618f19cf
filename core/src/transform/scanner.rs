//! file: core/src/transform/scanner.rs
//! description: brace-depth scanner over game source text.
//!
//! The transforms only need to know two things about the text they rewrite:
//! how deeply nested in braces a position is, and where the brace that
//! closes a block sits. `Scanner` walks the bytes once, tracking the lexical
//! context so braces inside string/template literals and comments are not
//! counted.

use crate::location::{Location, Span};
use crate::transform::err::UnbalancedScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexical {
    Code,
    LineComment,
    BlockComment,
    Str(u8),
    Template,
}

/// What a single call to [`Scanner::bump`] consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    End,
    Byte,
    Open,
    Close,
}

pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    lexical: Lexical,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner { bytes: text.as_bytes(), pos: 0, depth: 0, lexical: Lexical::Code }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// True when the cursor sits in code outside every brace pair.
    pub fn at_top_level(&self) -> bool {
        self.depth == 0 && self.lexical == Lexical::Code
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    /// Consume one byte (two for comment delimiters and escapes).
    pub fn bump(&mut self) -> Step {
        let Some(&b) = self.bytes.get(self.pos) else {
            return Step::End;
        };
        let mut width = 1;
        let mut step = Step::Byte;

        match self.lexical {
            Lexical::Code => match b {
                b'/' if self.peek_next() == Some(b'/') => {
                    self.lexical = Lexical::LineComment;
                    width = 2;
                }
                b'/' if self.peek_next() == Some(b'*') => {
                    self.lexical = Lexical::BlockComment;
                    width = 2;
                }
                b'"' | b'\'' => self.lexical = Lexical::Str(b),
                b'`' => self.lexical = Lexical::Template,
                b'{' => {
                    self.depth += 1;
                    step = Step::Open;
                }
                b'}' => {
                    // stray closers in malformed input stay at top level
                    self.depth = self.depth.saturating_sub(1);
                    step = Step::Close;
                }
                _ => {}
            },
            Lexical::LineComment => {
                if b == b'\n' {
                    self.lexical = Lexical::Code;
                }
            }
            Lexical::BlockComment => {
                if b == b'*' && self.peek_next() == Some(b'/') {
                    self.lexical = Lexical::Code;
                    width = 2;
                }
            }
            Lexical::Str(quote) => {
                if b == b'\\' {
                    width = 2;
                } else if b == quote || b == b'\n' {
                    self.lexical = Lexical::Code;
                }
            }
            Lexical::Template => {
                if b == b'\\' {
                    width = 2;
                } else if b == b'`' {
                    self.lexical = Lexical::Code;
                }
            }
        }

        self.pos = (self.pos + width).min(self.bytes.len());
        step
    }

    /// Scan forward until the cursor reaches `target`.
    pub fn seek(&mut self, target: usize) {
        while self.pos < target && self.bump() != Step::End {}
    }

    /// Move to the first byte after the next newline. Returns false at the end.
    pub fn advance_line(&mut self) -> bool {
        while let Some(&b) = self.bytes.get(self.pos) {
            self.bump();
            if b == b'\n' {
                return !self.at_end();
            }
        }
        false
    }
}

/// Byte offset where a trailing `//` comment starts in `line`, or its length
/// when there is none. Slashes inside string and template literals do not count.
pub fn line_comment_start(line: &str) -> usize {
    let mut scanner = Scanner::new(line);
    loop {
        let at = scanner.pos;
        if scanner.bump() == Step::End {
            return line.len();
        }
        if scanner.lexical == Lexical::LineComment {
            return at;
        }
    }
}

/// States of the block matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    SeekingBody,
    InBody { base: usize },
    Done,
}

/// Starting at the scanner's position, find the first code `{` and the
/// brace that closes it. Returns `(open, end)` where `end` is one past the
/// closing brace.
///
/// The scan only moves forward, so it always terminates; running off the end
/// of the text with the block still open is reported as an error.
pub fn match_block(
    scanner: &mut Scanner<'_>,
    text: &str,
    file: &str,
    what: &str,
) -> Result<(usize, usize), UnbalancedScanError> {
    let start = scanner.pos();
    let mut state = BlockState::SeekingBody;
    let mut open = start;

    while state != BlockState::Done {
        let at = scanner.pos();
        match (state, scanner.bump()) {
            (_, Step::End) => {
                return Err(UnbalancedScanError::new(
                    format!("unbalanced braces: {} never closes", what),
                    Location::from_offset(file, text, start),
                    Span::from_offsets(file, text, start, text.len()),
                ));
            }
            (BlockState::SeekingBody, Step::Open) => {
                open = at;
                state = BlockState::InBody { base: scanner.depth() - 1 };
            }
            (BlockState::InBody { base }, Step::Close) if scanner.depth() == base => {
                state = BlockState::Done;
            }
            _ => {}
        }
    }

    Ok((open, scanner.pos()))
}
