//! Line lexer for JSON with `${ ... }` interpolation regions.
//!
//! Overview
//! - [`Lexer::scan_line`] classifies one line and returns the state to resume
//!   from on the next line. It never fails: text a context does not expect is
//!   classified as [`TokenKind::Invalid`] (or an invalid escape) and scanning
//!   moves on.
//! - Every step consumes at least one byte, so a call is bounded by the length
//!   of the line.
//!
//! Contexts
//! - *Structural* (root, object, array) share one value sub-grammar:
//!   whitespace, comments, `${`, strings, numbers, keywords, `{`, `[`. Objects
//!   add `:` `,` `}`, arrays add `,` `]`.
//! - *String* scans raw text, escapes, and (for values) `${`.
//! - *Interpolation* hands the line to the [`EmbeddedGrammar`] and only takes
//!   control back at the `}` it reports.
//! - *Block comment* runs to `*/`.
//!
//! What a closed string or region returns to is always the frame underneath
//! it on the stack. A `}` that closes an interpolation region is therefore
//! never confused with the `}` of an enclosing object, at any depth: while the
//! region's frame is on top, `}` is not looked at by the structural contexts
//! at all.

mod cursor;
mod literals;


use alloc::vec::Vec;

use bstr::ByteSlice;
use cursor::{Cursor, TokenSink};

use crate::{
    embedded::{BraceBalanced, EmbeddedGrammar, Entry},
    options::LexerOptions,
    state::{Frame, Interpolation, LexState, ObjectSlot, Resume, StringRole},
    token::{Token, TokenKind},
};

/// Tokens for one line plus the state to scan the next line with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineTokens {
    /// Non-empty, ordered tokens that exactly cover the line.
    pub tokens: Vec<Token>,
    /// State at the end of the line.
    pub state: LexState,
}

/// The line lexer.
///
/// A `Lexer` holds only configuration; all scanning state is passed in and
/// returned by [`scan_line`](Self::scan_line). Scanning takes `&self`, so one
/// lexer can serve many documents and threads at once.
#[derive(Debug, Clone, Default)]
pub struct Lexer<E = BraceBalanced> {
    options: LexerOptions,
    embedded: E,
}

impl Lexer<BraceBalanced> {
    /// Creates a lexer that delegates interpolation regions to
    /// [`BraceBalanced`].
    #[must_use]
    pub fn new(options: LexerOptions) -> Self {
        Self::with_embedded(options, BraceBalanced)
    }
}

impl<E: EmbeddedGrammar> Lexer<E> {
    /// Creates a lexer with a custom embedded grammar.
    #[must_use]
    pub fn with_embedded(options: LexerOptions, embedded: E) -> Self {
        Self { options, embedded }
    }

    /// The options this lexer was created with.
    #[must_use]
    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// The embedded grammar regions are delegated to.
    #[must_use]
    pub fn embedded(&self) -> &E {
        &self.embedded
    }

    /// Classifies `line` starting from `state`.
    ///
    /// `line` should not contain a line terminator; a trailing `\r` (or `\n`)
    /// is accepted and classified as whitespace outside of strings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsoninterp::{LexState, Lexer, LexerOptions, TokenKind};
    ///
    /// let lexer = Lexer::new(LexerOptions::default());
    /// let first = lexer.scan_line(&LexState::new(), r#"{"x": ${a +"#);
    /// assert!(first.state.is_embedded());
    ///
    /// let second = lexer.scan_line(&first.state, "  b}}");
    /// let kinds: Vec<_> = second.tokens.iter().map(|t| t.kind).collect();
    /// assert_eq!(
    ///     kinds,
    ///     [
    ///         TokenKind::Embedded,
    ///         TokenKind::InterpolationBracket,
    ///         TokenKind::Bracket,
    ///     ]
    /// );
    /// assert!(second.state.is_initial());
    /// ```
    #[must_use]
    pub fn scan_line(&self, state: &LexState, line: &str) -> LineTokens {
        let mut scan = LineScan {
            options: &self.options,
            embedded: &self.embedded,
            cursor: Cursor::new(line),
            sink: TokenSink::default(),
            state: state.clone(),
            entry: Entry::Resumed,
        };
        scan.run();
        LineTokens {
            tokens: scan.sink.finish(),
            state: scan.state,
        }
    }
}

/// Scans `line` from `state` with default options and [`BraceBalanced`].
#[must_use]
pub fn scan_line(state: &LexState, line: &str) -> LineTokens {
    Lexer::new(LexerOptions::default()).scan_line(state, line)
}

/// The structural context a value is being scanned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Root,
    Object(ObjectSlot),
    Array,
}

struct LineScan<'a, 'src, E> {
    options: &'a LexerOptions,
    embedded: &'a E,
    cursor: Cursor<'src>,
    sink: TokenSink,
    state: LexState,
    /// How the delegate is entered on its next call.
    entry: Entry,
}

impl<E: EmbeddedGrammar> LineScan<'_, '_, E> {
    fn run(&mut self) {
        while !self.cursor.is_eof() {
            let before = self.cursor.pos();
            match self.state.top().copied() {
                None => self.structural(Container::Root),
                Some(Frame::Object(slot)) => self.structural(Container::Object(slot)),
                Some(Frame::Array) => self.structural(Container::Array),
                Some(Frame::String(role)) => self.string(role),
                Some(Frame::Interpolation(region)) => self.interpolation(region),
                Some(Frame::BlockComment) => self.block_comment(),
            }
            debug_assert!(self.cursor.pos() > before, "scanner step made no progress");
        }
    }

    /// Consumes `len` bytes and classifies them as `kind`.
    fn emit(&mut self, len: usize, kind: TokenKind) {
        let start = self.cursor.pos();
        self.cursor.bump(len);
        self.sink.push(start, self.cursor.pos(), kind);
    }

    /// Classifies everything consumed since `start` as `kind`.
    fn emit_from(&mut self, start: usize, kind: TokenKind) {
        self.sink.push(start, self.cursor.pos(), kind);
    }

    fn invalid_char(&mut self) {
        let start = self.cursor.pos();
        self.cursor.bump_char();
        self.emit_from(start, TokenKind::Invalid);
    }

    fn push(&mut self, frame: Frame) {
        trace!("push {frame:?} at {} (depth {})", self.cursor.pos(), self.state.depth());
        self.state.push(frame);
    }

    fn pop(&mut self) -> Option<Frame> {
        let frame = self.state.pop();
        trace!("pop {frame:?} at {} (depth {})", self.cursor.pos(), self.state.depth());
        frame
    }

    // --- structural contexts ---------------------------------------------

    fn structural(&mut self, container: Container) {
        let Some(ch) = self.cursor.peek() else {
            return;
        };

        if self.options.is_whitespace(ch) {
            let start = self.cursor.pos();
            let options = self.options;
            self.cursor.bump_while(|c| options.is_whitespace(c));
            self.emit_from(start, TokenKind::Whitespace);
            return;
        }

        if !self.options.disallow_comments {
            if self.cursor.starts_with("//") {
                // Ends at a newline when the buffer holds several lines.
                let start = self.cursor.pos();
                self.cursor.bump_until_byteset(b"\n");
                self.emit_from(start, TokenKind::Comment);
                return;
            }
            if self.cursor.starts_with("/*") {
                self.emit(2, TokenKind::Comment);
                self.push(Frame::BlockComment);
                return;
            }
        }

        match (ch, container) {
            (':', Container::Object(_)) => {
                self.emit(1, TokenKind::Delimiter);
                self.set_slot(ObjectSlot::Value);
            }
            (',', Container::Object(_)) => {
                self.emit(1, TokenKind::Delimiter);
                self.set_slot(ObjectSlot::Key);
            }
            (',', Container::Array) => self.emit(1, TokenKind::Delimiter),
            ('}', _) => self.close(|frame| matches!(frame, Frame::Object(_))),
            (']', _) => self.close(|frame| matches!(frame, Frame::Array)),
            _ => self.value(ch, container),
        }
    }

    fn set_slot(&mut self, next: ObjectSlot) {
        if let Some(Frame::Object(slot)) = self.state.top_mut() {
            *slot = next;
        }
    }

    /// Closes the innermost container accepted by `is_match`, popping any
    /// unclosed containers above it. A closer with nothing to close is still
    /// classified as a bracket and leaves the state alone.
    fn close(&mut self, is_match: impl Fn(&Frame) -> bool) {
        self.emit(1, TokenKind::Bracket);
        if self.state.pop_through(is_match) {
            trace!("close at {} (depth {})", self.cursor.pos(), self.state.depth());
            self.state.value_done();
        }
    }

    /// The value sub-grammar shared by every structural context.
    fn value(&mut self, ch: char, container: Container) {
        if self.cursor.starts_with("${") {
            self.open_interpolation(Resume::Value);
            return;
        }

        match ch {
            '"' => {
                let role = if container == Container::Object(ObjectSlot::Key) {
                    StringRole::Key
                } else {
                    StringRole::Value
                };
                self.emit(1, string_kind(role));
                self.push(Frame::String(role));
            }
            '{' => {
                self.emit(1, TokenKind::Bracket);
                self.push(Frame::Object(ObjectSlot::Key));
            }
            '[' => {
                self.emit(1, TokenKind::Bracket);
                self.push(Frame::Array);
            }
            '-' | '0'..='9' => {
                self.scalar(literals::number_len(self.cursor.rest_bytes()), TokenKind::Number);
            }
            't' | 'f' | 'n' => {
                self.scalar(literals::keyword_len(self.cursor.rest_bytes()), TokenKind::Keyword);
            }
            _ => self.invalid_char(),
        }
    }

    /// Classifies a number or keyword lexeme of `len` bytes. A lexeme glued
    /// to the scalar before it (`01`, `1-2`, `truefalse`) is not a second
    /// value and is classified invalid.
    fn scalar(&mut self, len: Option<usize>, kind: TokenKind) {
        let Some(len) = len else {
            self.invalid_char();
            return;
        };
        let pos = self.cursor.pos();
        let glued = self.sink.last().is_some_and(|prev| {
            prev.end == pos && matches!(prev.kind, TokenKind::Number | TokenKind::Keyword)
        });
        if glued {
            self.emit(len, TokenKind::Invalid);
        } else {
            self.emit(len, kind);
            self.state.value_done();
        }
    }

    fn open_interpolation(&mut self, resume: Resume) {
        self.emit(2, TokenKind::InterpolationBracket);
        self.push(Frame::Interpolation(Interpolation::open(resume)));
        self.entry = Entry::Opened;
    }

    // --- strings ----------------------------------------------------------

    fn string(&mut self, role: StringRole) {
        let kind = string_kind(role);
        let interpolates = role == StringRole::Value || self.options.interpolate_keys;

        match self.cursor.rest_bytes().first() {
            Some(b'"') => {
                self.emit(1, kind);
                self.pop();
                match role {
                    StringRole::Key => self.set_slot(ObjectSlot::Colon),
                    StringRole::Value => self.state.value_done(),
                }
            }
            Some(b'\\') => self.escape(),
            Some(b'$') if interpolates && self.cursor.starts_with("${") => {
                self.open_interpolation(Resume::String);
            }
            Some(_) => {
                let start = self.cursor.pos();
                if interpolates {
                    // A `$` here is not followed by `{`: it is plain text.
                    if self.cursor.starts_with("$") {
                        self.cursor.bump(1);
                    }
                    self.cursor.bump_until_byteset(b"\"\\$");
                } else {
                    self.cursor.bump_until_byteset(b"\"\\");
                }
                self.emit_from(start, kind);
            }
            None => {}
        }
    }

    fn escape(&mut self) {
        if let Some(len) = literals::escape_len(self.cursor.rest_bytes()) {
            self.emit(len, TokenKind::StringEscape);
            return;
        }
        // The backslash plus the character it fails to escape, unless that
        // is the end of the line.
        let start = self.cursor.pos();
        self.cursor.bump(1);
        if self.cursor.peek().is_some_and(|ch| ch != '\n') {
            self.cursor.bump_char();
        }
        self.emit_from(start, TokenKind::StringEscapeInvalid);
    }

    // --- delegated regions --------------------------------------------------

    fn interpolation(&mut self, mut region: Interpolation) {
        let span = self.cursor.rest();
        let entry = core::mem::replace(&mut self.entry, Entry::Resumed);
        let reported = self.embedded.scan(span, entry, &mut region.carry);

        let Some(close) = reported.and_then(|at| trusted_close(span, at)) else {
            // The region runs past the end of the line.
            self.emit(span.len(), TokenKind::Embedded);
            if let Some(Frame::Interpolation(top)) = self.state.top_mut() {
                *top = region;
            }
            return;
        };

        self.emit(close, TokenKind::Embedded);
        self.emit(1, TokenKind::InterpolationBracket);
        trace!("leave {region:?} at {}", self.cursor.pos());
        self.pop();
        if region.resume == Resume::Value {
            self.state.value_done();
        }
    }

    // --- comments -------------------------------------------------------------

    fn block_comment(&mut self) {
        match self.cursor.find("*/") {
            Some(at) => {
                self.emit(at + 2, TokenKind::Comment);
                self.pop();
            }
            None => {
                let rest = self.cursor.rest().len();
                self.emit(rest, TokenKind::Comment);
            }
        }
    }
}

fn string_kind(role: StringRole) -> TokenKind {
    match role {
        StringRole::Key => TokenKind::StringKey,
        StringRole::Value => TokenKind::StringValue,
    }
}

/// Validates a boundary reported by the embedded grammar. A report that does
/// not point at a `}` is replaced by the first `}` at or after it.
fn trusted_close(span: &str, at: usize) -> Option<usize> {
    let bytes = span.as_bytes();
    if bytes.get(at) == Some(&b'}') {
        return Some(at);
    }
    bytes.get(at..)?.find_byte(b'}').map(|offset| at + offset)
}
