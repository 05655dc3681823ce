#![allow(clippy::struct_excessive_bools)]

/// Configuration options for the line lexer.
///
/// # Examples
///
/// ```rust
/// use jsoninterp::{Lexer, LexerOptions};
///
/// let lexer = Lexer::new(LexerOptions {
///     interpolate_keys: true,
///     ..Default::default()
/// });
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Whether to classify any Unicode whitespace as whitespace.
    ///
    /// By default only the four whitespace characters defined by JSON are
    /// recognized: space (U+0020), line feed (U+000A), carriage return
    /// (U+000D), and horizontal tab (U+0009). Anything else outside a string
    /// is classified as invalid.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether `${` opens an interpolation region inside object keys.
    ///
    /// When `false`, a key such as `"${a}"` is plain key text.
    ///
    /// # Default
    ///
    /// `false`
    pub interpolate_keys: bool,

    /// Whether to stop recognizing `//` and `/* */` comments.
    ///
    /// Enabling this restricts the structural contexts to plain JSON; comment
    /// markers are then classified as invalid text.
    ///
    /// # Default
    ///
    /// `false`
    pub disallow_comments: bool,
}

impl LexerOptions {
    pub(crate) fn is_whitespace(&self, ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r') || (self.allow_unicode_whitespace && ch.is_whitespace())
    }
}
