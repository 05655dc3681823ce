#![allow(missing_docs)]
#![allow(dead_code)]

use core::fmt::Write;

use jsoninterp::{EmbeddedGrammar, LexState, Lexer, TokenKind};

/// A configuration file exercising every context, with one interpolation
/// region that spans lines.
pub const DOCUMENT: &str = r#"{
  // region: request
  "url": "https://${host}/v1",
  "retries": ${ retries + 1 },
  "headers": {"x-id": "\u00e9\q"},
  /* multi
     line */ "tags": [true, null, -1.5e3],
  "body": "${ render({
    a: 1
  }) }"
  // endregion
}"#;

/// Renders one row per non-whitespace token as `line:start..end tag text`,
/// followed by the state each line ends in.
pub fn render<E: EmbeddedGrammar>(lexer: &Lexer<E>, text: &str) -> String {
    let mut out = String::new();
    let mut state = LexState::new();
    for (n, line) in text.split('\n').enumerate() {
        let scanned = lexer.scan_line(&state, line);
        for token in &scanned.tokens {
            if token.kind == TokenKind::Whitespace {
                continue;
            }
            writeln!(
                out,
                "{n}:{}..{} {} {:?}",
                token.start,
                token.end,
                token.kind.tag(),
                token.text(line)
            )
            .unwrap();
        }
        state = scanned.state;
        writeln!(out, "  = {:?}", state.frames()).unwrap();
    }
    out
}
