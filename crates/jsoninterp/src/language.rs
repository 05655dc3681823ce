//! Editor metadata for the language.
//!
//! Hosts that register the tokenizer usually also need bracket pairs, comment
//! markers, auto-closing behavior and folding markers. These are fixed for the
//! language and exposed as [`CONFIGURATION`]. Patterns are given as regex
//! source strings (in the syntax of the `regex` crate) so hosts can compile
//! them with whatever engine they use; [`folding_marker`] recognizes folding
//! markers without one.

/// Comment delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentMarkers {
    /// Starts a comment that runs to the end of the line.
    pub line: &'static str,
    /// Opening and closing markers of a block comment.
    pub block: (&'static str, &'static str),
}

/// An opening and closing bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    #[allow(missing_docs)]
    pub open: &'static str,
    #[allow(missing_docs)]
    pub close: &'static str,
}

/// A pair the editor closes automatically when `open` is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoClosingPair {
    /// Typed text that triggers the pair.
    pub open: &'static str,
    /// Text inserted after the cursor.
    pub close: &'static str,
    /// Scopes in which the pair is not auto-closed.
    pub not_in: &'static [&'static str],
}

/// Regex sources for lines that start and end a folding region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldingMarkers {
    /// Matches a line that opens a region.
    pub start: &'static str,
    /// Matches a line that closes a region.
    pub end: &'static str,
}

/// Everything an editor needs besides the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageConfiguration {
    /// What the editor treats as one word, e.g. for double-click selection.
    pub word_pattern: &'static str,
    #[allow(missing_docs)]
    pub comments: CommentMarkers,
    /// Pairs used for bracket matching. `${` closes with a plain `}`.
    pub brackets: &'static [BracketPair],
    /// Pairs the editor closes as the opening half is typed.
    pub auto_closing_pairs: &'static [AutoClosingPair],
    /// Pairs that wrap a selection when `open` is typed over it.
    pub surrounding_pairs: &'static [BracketPair],
    #[allow(missing_docs)]
    pub folding: FoldingMarkers,
}

/// The configuration of JSON with interpolation.
pub static CONFIGURATION: LanguageConfiguration = LanguageConfiguration {
    word_pattern: r#"(-?\d*\.\d\w*)|([^\[\{\]\}:",\s]+)"#,
    comments: CommentMarkers {
        line: "//",
        block: ("/*", "*/"),
    },
    brackets: &[
        BracketPair {
            open: "{",
            close: "}",
        },
        BracketPair {
            open: "[",
            close: "]",
        },
        BracketPair {
            open: "${",
            close: "}",
        },
    ],
    auto_closing_pairs: &[
        AutoClosingPair {
            open: "{",
            close: "}",
            not_in: &[],
        },
        AutoClosingPair {
            open: "[",
            close: "]",
            not_in: &[],
        },
        AutoClosingPair {
            open: "\"",
            close: "\"",
            not_in: &["string"],
        },
        AutoClosingPair {
            open: "${",
            close: "}",
            not_in: &[],
        },
    ],
    surrounding_pairs: &[
        BracketPair {
            open: "{",
            close: "}",
        },
        BracketPair {
            open: "[",
            close: "]",
        },
        BracketPair {
            open: "\"",
            close: "\"",
        },
    ],
    folding: FoldingMarkers {
        start: r"^\s*//\s*#?region\b",
        end: r"^\s*//\s*#?endregion\b",
    },
};

/// Which end of a folding region a marker line opens or closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldingMarker {
    /// `// region`
    Start,
    /// `// endregion`
    End,
}

/// Recognizes `// region` and `// endregion` marker lines (optionally written
/// `#region` / `#endregion`), as described by [`CONFIGURATION`]`.folding`.
///
/// The marker word must end at a word boundary: `// regional` is not a marker,
/// but `// region: setup` is.
#[must_use]
pub fn folding_marker(line: &str) -> Option<FoldingMarker> {
    let rest = line.trim_start().strip_prefix("//")?.trim_start();
    let rest = rest.strip_prefix('#').unwrap_or(rest);
    let (marker, after) = if let Some(after) = rest.strip_prefix("endregion") {
        (FoldingMarker::End, after)
    } else {
        (FoldingMarker::Start, rest.strip_prefix("region")?)
    };
    match after.chars().next() {
        Some(ch) if ch.is_alphanumeric() || ch == '_' => None,
        _ => Some(marker),
    }
}
