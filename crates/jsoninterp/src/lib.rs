//! A resumable, line-oriented tokenizer for JSON with `${ ... }` interpolation.
//!
//! The lexer classifies one line at a time. Each call takes the [`LexState`]
//! left by the previous line and returns the tokens for this line together
//! with the state for the next, so an editor only has to re-tokenize the lines
//! that changed and the lines whose starting state changed as a result (see
//! [`TokenizedDocument`]).
//!
//! Text inside `${ ... }` belongs to another grammar. The lexer delegates it to
//! an [`EmbeddedGrammar`] and only takes control back at the `}` that grammar
//! reports, returning to exactly the object, array or string the region was
//! opened in.
//!
//! ```rust
//! use jsoninterp::{LexState, TokenKind, scan_line};
//!
//! let line = r#"{"msg": "Hi ${name}!"}"#;
//! let out = scan_line(&LexState::new(), line);
//! let tags: Vec<_> = out
//!     .tokens
//!     .iter()
//!     .map(|t| (t.kind.tag(), t.text(line)))
//!     .collect();
//! assert_eq!(
//!     tags,
//!     [
//!         ("delimiter.bracket", "{"),
//!         ("string.key", "\"msg\""),
//!         ("delimiter", ":"),
//!         ("", " "),
//!         ("string.value", "\"Hi "),
//!         ("delimiter.bracket.interpolation", "${"),
//!         ("embedded", "name"),
//!         ("delimiter.bracket.interpolation", "}"),
//!         ("string.value", "!\""),
//!         ("delimiter.bracket", "}"),
//!     ]
//! );
//! assert!(out.state.is_initial());
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, trace_scanner))]
extern crate std;

/// Prints scanner transitions to stderr when built with
/// `--cfg trace_scanner`; otherwise only type-checks its arguments.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(trace_scanner)]
        std::eprintln!($($arg)*);
        #[cfg(not(trace_scanner))]
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

mod document;
mod embedded;
mod error;
pub mod language;
mod lexer;
mod options;
mod state;
mod token;

#[cfg(test)]
mod tests;

pub use document::TokenizedDocument;
pub use embedded::{BraceBalanced, EmbeddedGrammar, Entry, FirstBrace};
pub use error::DocumentError;
pub use lexer::{Lexer, LineTokens, scan_line};
pub use options::LexerOptions;
pub use state::{Frame, Interpolation, LexState, ObjectSlot, Resume, StringRole};
pub use token::{TOKEN_POSTFIX, Token, TokenKind};
