//! Prints a document with ANSI colors, one line at a time, the way an editor
//! would tokenize it.
//!
//! Each line is scanned from the state the previous line ended in, so a string
//! or `${ ... }` region that is still open at the end of a line carries over.
//! The state at the end of every line is shown in the margin when it differs
//! from the top level.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsoninterp --example highlight [FILE]
//! ```
//!
//! Without `FILE`, a built-in sample is highlighted.

#![allow(clippy::needless_raw_string_hashes)]

use std::{env, fs, process};

use jsoninterp::{
    LexState, Lexer, LexerOptions, TokenKind,
    language::{FoldingMarker, folding_marker},
};

const SAMPLE: &str = r#"{
  // #region connection
  "host": "${env.HOST}",
  "port": ${ env.PORT ?? 8080 },
  "banner": "Welcome, ${ user.name }!\n",
  // #endregion
  "routes": [
    { "path": "/", "handler": ${ handlers({
      index: true
    }) } }
  ]
}"#;

fn color(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Whitespace => "",
        TokenKind::Bracket | TokenKind::Delimiter => "\x1b[37m",
        TokenKind::StringKey => "\x1b[36m",
        TokenKind::StringValue => "\x1b[32m",
        TokenKind::StringEscape => "\x1b[33m",
        TokenKind::StringEscapeInvalid | TokenKind::Invalid => "\x1b[4;31m",
        TokenKind::Number | TokenKind::Keyword => "\x1b[35m",
        TokenKind::Comment => "\x1b[2m",
        TokenKind::InterpolationBracket => "\x1b[1;34m",
        TokenKind::Embedded => "\x1b[34m",
    }
}

fn main() {
    let text = match env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).unwrap_or_else(|err| {
            eprintln!("cannot read {path}: {err}");
            process::exit(1);
        }),
        None => SAMPLE.to_owned(),
    };

    let lexer = Lexer::new(LexerOptions::default());
    let mut state = LexState::new();
    for (n, line) in text.lines().enumerate() {
        let out = lexer.scan_line(&state, line);

        let fold = match folding_marker(line) {
            Some(FoldingMarker::Start) => '+',
            Some(FoldingMarker::End) => '-',
            None => ' ',
        };
        let mut rendered = String::new();
        for token in &out.tokens {
            let code = color(token.kind);
            if code.is_empty() {
                rendered.push_str(token.text(line));
            } else {
                rendered.push_str(code);
                rendered.push_str(token.text(line));
                rendered.push_str("\x1b[0m");
            }
        }
        print!("{:>4} {fold} {rendered}", n + 1);
        if !out.state.is_initial() {
            print!("  \x1b[2m{:?}\x1b[0m", out.state.top());
        }
        println!();

        state = out.state;
    }

    if !state.is_initial() {
        eprintln!("unterminated at end of input: {:?}", state.frames());
        process::exit(2);
    }
}
