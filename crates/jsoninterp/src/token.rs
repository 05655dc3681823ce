use core::ops::Range;

/// Postfix appended to every tag by [`TokenKind::scope`].
pub const TOKEN_POSTFIX: &str = ".json-interpolation";

/// Classification of a span of text.
///
/// The tag strings returned by [`TokenKind::tag`] are the wire contract with
/// host styling rules and must not change between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TokenKind {
    /// Space, tab, CR, LF (or any Unicode whitespace when enabled).
    Whitespace,
    /// `{` `}` `[` `]`
    Bracket,
    /// `:` `,`
    Delimiter,
    /// An object key, quotes included.
    StringKey,
    /// A string value, quotes included.
    StringValue,
    /// A recognized escape sequence such as `\n` or `\u00e9`.
    StringEscape,
    /// A backslash that does not begin a recognized escape.
    StringEscapeInvalid,
    /// A JSON number.
    Number,
    /// `true`, `false`, `null`
    Keyword,
    /// Line or block comment text, markers included.
    Comment,
    /// The `${` opening and the `}` closing an interpolation region.
    InterpolationBracket,
    /// Text handed to the embedded grammar.
    Embedded,
    /// Anything the current context does not recognize.
    Invalid,
}

impl TokenKind {
    /// The stable classification tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "",
            TokenKind::Bracket => "delimiter.bracket",
            TokenKind::Delimiter => "delimiter",
            TokenKind::StringKey => "string.key",
            TokenKind::StringValue => "string.value",
            TokenKind::StringEscape => "string.escape",
            TokenKind::StringEscapeInvalid => "string.escape.invalid",
            TokenKind::Number => "number",
            TokenKind::Keyword => "keyword",
            TokenKind::Comment => "comment",
            TokenKind::InterpolationBracket => "delimiter.bracket.interpolation",
            TokenKind::Embedded => "embedded",
            TokenKind::Invalid => "invalid",
        }
    }

    /// The tag with the language postfix, e.g. `number.json-interpolation`.
    ///
    /// Whitespace has an empty tag and therefore an empty scope.
    #[must_use]
    pub fn scope(self) -> alloc::string::String {
        let tag = self.tag();
        if tag.is_empty() {
            return alloc::string::String::new();
        }
        let mut scope = alloc::string::String::with_capacity(tag.len() + TOKEN_POSTFIX.len());
        scope.push_str(tag);
        scope.push_str(TOKEN_POSTFIX);
        scope
    }
}

/// A classified, half-open byte range within one line.
///
/// Offsets always fall on `char` boundaries of the scanned line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// First byte of the span.
    pub start: usize,
    /// One past the last byte of the span.
    pub end: usize,
    #[allow(missing_docs)]
    pub kind: TokenKind,
}

impl Token {
    /// A token covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize, kind: TokenKind) -> Self {
        Self { start, end, kind }
    }

    /// The byte range, for slicing the line.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-length span.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text this token covers in `line`.
    ///
    /// Returns an empty string if `line` is not the line this token was
    /// produced from and the span does not fit.
    #[must_use]
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.span()).unwrap_or_default()
    }

    /// Converts the byte span to character columns within `line`.
    #[must_use]
    pub fn columns(&self, line: &str) -> Range<usize> {
        let start = line.get(..self.start).map_or(0, |s| s.chars().count());
        let width = self.text(line).chars().count();
        start..start + width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_carry_postfix() {
        assert_eq!(TokenKind::Number.scope(), "number.json-interpolation");
        assert_eq!(
            TokenKind::InterpolationBracket.scope(),
            "delimiter.bracket.interpolation.json-interpolation"
        );
        assert_eq!(TokenKind::Whitespace.scope(), "");
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let line = "\"é\": 1";
        // `1` sits at byte 6 but char column 5.
        let token = Token::new(6, 7, TokenKind::Number);
        assert_eq!(token.text(line), "1");
        assert_eq!(token.columns(line), 5..6);
    }
}
