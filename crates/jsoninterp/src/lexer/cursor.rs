//! Cursor: per-line reader and token sink.
//!
//! The cursor walks one line by byte offset and never retains it past the
//! call that created it. Every advance keeps the offset on a `char` boundary:
//! multi-byte scalars are stepped over whole, and the bulk helpers only stop
//! on ASCII bytes, which can never occur inside a multi-byte sequence.
use alloc::vec::Vec;

use bstr::ByteSlice;

use crate::token::{Token, TokenKind};

#[derive(Debug)]
pub(crate) struct Cursor<'src> {
    line: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(line: &'src str) -> Self {
        Self { line, pos: 0 }
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// Unread remainder of the line.
    #[inline]
    pub fn rest(&self) -> &'src str {
        &self.line[self.pos..]
    }

    #[inline]
    pub fn rest_bytes(&self) -> &'src [u8] {
        &self.line.as_bytes()[self.pos..]
    }

    /// Decodes but does not consume the next character.
    pub fn peek(&self) -> Option<char> {
        let (ch, len) = bstr::decode_utf8(self.rest_bytes());
        if len == 0 {
            return None;
        }
        Some(ch.unwrap_or('\u{FFFD}'))
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advances by `len` bytes, clamped to the end of the line.
    ///
    /// Callers pass lengths of ASCII lexemes or of whole decoded characters.
    #[inline]
    pub fn bump(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.line.len());
    }

    /// Consumes one character, whatever its width.
    pub fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes characters while `pred` holds and returns how many bytes were
    /// consumed.
    pub fn bump_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.pos - start
    }

    /// Consumes up to, not including, the first byte from `set`, or to the end
    /// of the line. `set` must be ASCII.
    pub fn bump_until_byteset(&mut self, set: &[u8]) -> usize {
        let len = self
            .rest_bytes()
            .find_byteset(set)
            .unwrap_or(self.rest_bytes().len());
        self.pos += len;
        len
    }

    /// Byte offset of `needle` from the current position, if present.
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.rest_bytes().find(needle)
    }
}

/// Collects tokens for one line, coalescing neighbors of the same kind.
#[derive(Debug, Default)]
pub(crate) struct TokenSink {
    tokens: Vec<Token>,
}

impl TokenSink {
    pub fn push(&mut self, start: usize, end: usize, kind: TokenKind) {
        if start >= end {
            return;
        }
        if let Some(last) = self.tokens.last_mut() {
            if last.kind == kind && last.end == start {
                last.end = end;
                return;
            }
        }
        self.tokens.push(Token::new(start, end, kind));
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn bump_until_stops_on_ascii_only() {
        let mut cursor = Cursor::new("héllo\"rest");
        assert_eq!(cursor.bump_until_byteset(b"\"\\"), 6);
        assert_eq!(cursor.peek(), Some('"'));
        assert_eq!(cursor.rest(), "\"rest");
    }

    #[test]
    fn bump_until_runs_to_end() {
        let mut cursor = Cursor::new("plain");
        assert_eq!(cursor.bump_until_byteset(b"\""), 5);
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn bump_char_steps_whole_scalars() {
        let mut cursor = Cursor::new("é!");
        assert_eq!(cursor.bump_char(), Some('é'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.bump_char(), Some('!'));
        assert_eq!(cursor.bump_char(), None);
    }

    #[test]
    fn bump_is_clamped() {
        let mut cursor = Cursor::new("ab");
        cursor.bump(10);
        assert_eq!(cursor.pos(), 2);
        assert!(cursor.is_eof());
    }

    #[test]
    fn sink_coalesces_adjacent_same_kind() {
        let mut sink = TokenSink::default();
        sink.push(0, 1, TokenKind::Bracket);
        sink.push(1, 2, TokenKind::Bracket);
        sink.push(2, 2, TokenKind::Number);
        sink.push(2, 3, TokenKind::Number);
        assert_eq!(
            sink.finish(),
            vec![
                Token::new(0, 2, TokenKind::Bracket),
                Token::new(2, 3, TokenKind::Number),
            ]
        );
    }
}
