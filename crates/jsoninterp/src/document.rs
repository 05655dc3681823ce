//! Incremental re-tokenization of a whole document.
//!
//! [`TokenizedDocument`] keeps every line with its tokens and end state. An
//! edit re-scans the edited lines, then keeps going only while the state at the
//! end of a re-scanned line differs from what it was before the edit. Lines
//! after the first unchanged end state keep their tokens untouched.
use alloc::{string::String, vec::Vec};
use core::ops::Range;

use crate::{
    embedded::{BraceBalanced, EmbeddedGrammar},
    error::DocumentError,
    lexer::{Lexer, LineTokens},
    state::LexState,
    token::Token,
};

#[derive(Debug, Clone)]
struct Line {
    text: String,
    tokens: Vec<Token>,
    /// State after this line; the next line starts from it.
    end: LexState,
}

impl Line {
    fn unscanned(text: String) -> Self {
        Self {
            text,
            tokens: Vec::new(),
            end: LexState::default(),
        }
    }
}

/// A document split into lines, each kept tokenized.
///
/// # Examples
///
/// ```rust
/// use jsoninterp::{Lexer, LexerOptions, TokenizedDocument};
///
/// let mut doc = TokenizedDocument::new(
///     Lexer::new(LexerOptions::default()),
///     "{\n  \"a\": 1,\n  \"b\": 2\n}",
/// );
/// assert!(doc.is_balanced());
///
/// // Opening a string on line 1 changes how every later line starts.
/// let rescanned = doc.replace_line(1, "  \"a\": \"1,").unwrap();
/// assert_eq!(rescanned, 1..4);
/// assert!(!doc.is_balanced());
///
/// // Closing it again stops re-scanning as soon as the states agree.
/// let rescanned = doc.replace_line(1, "  \"a\": \"1\",").unwrap();
/// assert_eq!(rescanned, 1..4);
/// assert!(doc.is_balanced());
///
/// let rescanned = doc.replace_line(2, "  \"b\": 3").unwrap();
/// assert_eq!(rescanned, 2..3);
/// ```
#[derive(Debug, Clone)]
pub struct TokenizedDocument<E = BraceBalanced> {
    lexer: Lexer<E>,
    lines: Vec<Line>,
}

impl<E: EmbeddedGrammar> TokenizedDocument<E> {
    /// Splits `text` on `\n` and tokenizes every line. A `\r` before the `\n`
    /// stays on its line and is classified as whitespace.
    #[must_use]
    pub fn new(lexer: Lexer<E>, text: &str) -> Self {
        Self::from_lines(lexer, text.split('\n'))
    }

    /// Builds and scans a document from already split lines.
    #[must_use]
    pub fn from_lines<I, S>(lexer: Lexer<E>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self {
            lexer,
            lines: lines.into_iter().map(|l| Line::unscanned(l.into())).collect(),
        };
        let len = doc.lines.len();
        doc.rescan(0, len);
        doc
    }

    /// The lexer every line is scanned with.
    #[must_use]
    pub fn lexer(&self) -> &Lexer<E> {
        &self.lexer
    }

    /// Number of lines; an empty text is one empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of `line`, without its terminator.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|l| l.text.as_str())
    }

    /// Cached tokens of `line`.
    #[must_use]
    pub fn line_tokens(&self, line: usize) -> Option<&[Token]> {
        self.lines.get(line).map(|l| l.tokens.as_slice())
    }

    /// The state `line` is scanned from. `line` may equal
    /// [`line_count`](Self::line_count), giving the final state.
    #[must_use]
    pub fn state_before(&self, line: usize) -> Option<&LexState> {
        static INITIAL: LexState = LexState::EMPTY;
        match line {
            0 => Some(&INITIAL),
            n => self.lines.get(n - 1).map(|l| &l.end),
        }
    }

    /// The state after the last line.
    #[must_use]
    pub fn final_state(&self) -> LexState {
        self.lines.last().map(|l| l.end.clone()).unwrap_or_default()
    }

    /// Returns `true` if every construct opened in the document is closed.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.lines.last().is_none_or(|l| l.end.is_initial())
    }

    /// Iterates over `(text, tokens)` for every line.
    pub fn lines(&self) -> impl Iterator<Item = (&str, &[Token])> {
        self.lines
            .iter()
            .map(|l| (l.text.as_str(), l.tokens.as_slice()))
    }

    /// Replaces the text of one line and returns the range of lines that were
    /// re-tokenized.
    ///
    /// # Errors
    ///
    /// [`DocumentError::LineOutOfRange`] if `line` does not exist.
    pub fn replace_line(
        &mut self,
        line: usize,
        text: impl Into<String>,
    ) -> Result<Range<usize>, DocumentError> {
        let len = self.lines.len();
        let slot = self
            .lines
            .get_mut(line)
            .ok_or(DocumentError::LineOutOfRange { line, len })?;
        slot.text = text.into();
        Ok(self.rescan(line, line + 1))
    }

    /// Inserts lines before `at` (or appends when `at` equals the line count)
    /// and returns the range of lines that were re-tokenized.
    ///
    /// # Errors
    ///
    /// [`DocumentError::LineOutOfRange`] if `at` is past the end.
    pub fn insert_lines<I, S>(&mut self, at: usize, lines: I) -> Result<Range<usize>, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let len = self.lines.len();
        if at > len {
            return Err(DocumentError::LineOutOfRange { line: at, len });
        }
        let inserted: Vec<Line> = lines
            .into_iter()
            .map(|l| Line::unscanned(l.into()))
            .collect();
        let count = inserted.len();
        self.lines.splice(at..at, inserted);
        if at == self.lines.len() {
            return Ok(at..at);
        }
        Ok(self.rescan(at, at + count))
    }

    /// Removes `range` and returns the range of following lines (in the new
    /// numbering) that were re-tokenized.
    ///
    /// # Errors
    ///
    /// [`DocumentError::RangeOutOfBounds`] if `range` is inverted or extends
    /// past the end.
    pub fn remove_lines(&mut self, range: Range<usize>) -> Result<Range<usize>, DocumentError> {
        let len = self.lines.len();
        if range.start > range.end || range.end > len {
            return Err(DocumentError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        let start = range.start;
        self.lines.drain(range);
        if start == self.lines.len() {
            return Ok(start..start);
        }
        Ok(self.rescan(start, start))
    }

    /// Re-scans from `from`: unconditionally up to `forced_end`, then until a
    /// line's end state comes out unchanged.
    fn rescan(&mut self, from: usize, forced_end: usize) -> Range<usize> {
        let mut state = self.state_before(from).cloned().unwrap_or_default();
        let mut idx = from;
        while let Some(line) = self.lines.get_mut(idx) {
            let LineTokens { tokens, state: end } = self.lexer.scan_line(&state, &line.text);
            let settled = idx + 1 >= forced_end && end == line.end;
            line.tokens = tokens;
            line.end = end.clone();
            idx += 1;
            if settled {
                break;
            }
            state = end;
        }
        from..idx
    }
}
