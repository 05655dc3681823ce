#![no_main]

use arbitrary::Arbitrary;
use jsoninterp::{
    BraceBalanced, EmbeddedGrammar, FirstBrace, LexState, Lexer, LexerOptions, TokenizedDocument,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    allow_unicode_whitespace: bool,
    interpolate_keys: bool,
    disallow_comments: bool,
    first_brace: bool,
    /// Line replaced after the initial scan, and its new text.
    edit: Option<(u8, &'a str)>,
}

fuzz_target!(|input: Input<'_>| {
    let options = LexerOptions {
        allow_unicode_whitespace: input.allow_unicode_whitespace,
        interpolate_keys: input.interpolate_keys,
        disallow_comments: input.disallow_comments,
    };
    if input.first_brace {
        check(&Lexer::with_embedded(options, FirstBrace), &input);
    } else {
        check(&Lexer::with_embedded(options, BraceBalanced), &input);
    }
});

fn check<E: EmbeddedGrammar + Clone>(lexer: &Lexer<E>, input: &Input<'_>) {
    // Line by line: tokens partition each line.
    let mut state = LexState::new();
    let mut per_line = Vec::new();
    for line in input.text.split('\n') {
        let out = lexer.scan_line(&state, line);
        let mut pos = 0;
        for token in &out.tokens {
            assert_eq!(token.start, pos, "gap or overlap in {line:?}");
            assert!(token.end > token.start, "empty token in {line:?}");
            assert!(line.is_char_boundary(token.end));
            pos = token.end;
            per_line.extend(token.text(line).chars().map(|_| token.kind));
        }
        assert_eq!(pos, line.len(), "line {line:?} not fully covered");
        assert_eq!(out, lexer.scan_line(&state, line), "nondeterministic");
        state = out.state;
    }

    // Single pass over the whole text: same classification, same end state.
    let whole = lexer.scan_line(&LexState::new(), input.text);
    let single: Vec<_> = whole
        .tokens
        .iter()
        .flat_map(|t| {
            t.text(input.text)
                .chars()
                .filter(|&ch| ch != '\n')
                .map(move |_| t.kind)
        })
        .collect();
    assert_eq!(per_line, single);
    assert_eq!(state, whole.state);

    // An incremental edit agrees with a fresh document.
    let Some((at, text)) = input.edit else {
        return;
    };
    let mut doc = TokenizedDocument::new(lexer.clone(), input.text);
    let at = usize::from(at) % doc.line_count();
    let text = text.replace('\n', " ");
    doc.replace_line(at, text.as_str()).unwrap();
    let fresh = TokenizedDocument::from_lines(lexer.clone(), doc.lines().map(|(line, _)| line));
    assert!(doc.lines().eq(fresh.lines()));
    assert_eq!(doc.final_state(), fresh.final_state());
}
