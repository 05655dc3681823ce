//! Delegation of `${ ... }` regions to an embedded grammar.
//!
//! The lexer does not classify text inside an interpolation region. It hands
//! the span to an [`EmbeddedGrammar`] and only asks it one question: where is
//! the `}` that closes the region? Presenting the embedded tokens is the
//! delegate's own business; nothing but the boundary flows back.
use bstr::ByteSlice;

/// How the lexer reached the span it hands to the delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    /// The span starts right after `${`.
    Opened,
    /// The span starts a line that continues a region opened earlier.
    Resumed,
}

/// A grammar that owns the text of interpolation regions.
///
/// `scan` receives the rest of the current line from the point where the
/// region (re)starts. It returns the byte offset within `span` of the `}` that
/// terminates the region, or `None` if the region continues onto the next
/// line. `carry` is persisted in the lexer state between calls for the same
/// region and starts at `0`; the lexer never looks at it.
///
/// Implementations must be pure: the same `(span, entry, carry)` must produce
/// the same result and the same updated `carry`.
pub trait EmbeddedGrammar {
    fn scan(&self, span: &str, entry: Entry, carry: &mut u32) -> Option<usize>;
}

impl<F> EmbeddedGrammar for F
where
    F: Fn(&str, Entry, &mut u32) -> Option<usize>,
{
    fn scan(&self, span: &str, entry: Entry, carry: &mut u32) -> Option<usize> {
        self(span, entry, carry)
    }
}

/// Closes a region at the first `}` whose braces are balanced.
///
/// Brace depth is kept in `carry`, so object literals spread across lines
/// inside a region resolve correctly. Quoted literals (`'…'`, `"…"` and
/// `` `…` ``) are skipped; an unterminated one runs to the end of the line.
/// Spans that contain several lines are treated as if each line had been
/// handed over separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceBalanced;

impl EmbeddedGrammar for BraceBalanced {
    fn scan(&self, span: &str, entry: Entry, carry: &mut u32) -> Option<usize> {
        if entry == Entry::Opened {
            *carry = 0;
        }
        let bytes = span.as_bytes();
        let mut idx = 0;
        while let Some(offset) = bytes[idx..].find_byteset(b"{}'\"`") {
            let at = idx + offset;
            match bytes[at] {
                b'{' => {
                    *carry = carry.saturating_add(1);
                    idx = at + 1;
                }
                b'}' => {
                    if *carry == 0 {
                        return Some(at);
                    }
                    *carry -= 1;
                    idx = at + 1;
                }
                quote => idx = skip_quoted(bytes, at + 1, quote),
            }
        }
        None
    }
}

/// Returns the index just past the closing `quote`, honoring backslash
/// escapes. An unterminated literal stops at the next `\n`, or runs to the
/// end of `bytes`.
fn skip_quoted(bytes: &[u8], mut idx: usize, quote: u8) -> usize {
    while let Some(offset) = bytes
        .get(idx..)
        .and_then(|rest| rest.find_byteset([quote, b'\\', b'\n']))
    {
        let at = idx + offset;
        match bytes[at] {
            b'\n' => return at,
            b'\\' if bytes.get(at + 1) == Some(&b'\n') => return at + 1,
            b'\\' => idx = at + 2,
            _ => return at + 1,
        }
    }
    bytes.len()
}

/// Closes a region at the first `}`, whatever precedes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstBrace;

impl EmbeddedGrammar for FirstBrace {
    fn scan(&self, span: &str, _entry: Entry, _carry: &mut u32) -> Option<usize> {
        span.as_bytes().find_byte(b'}')
    }
}
