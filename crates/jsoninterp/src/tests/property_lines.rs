use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::arbitrary::{Edit, Fragments, WellFormed, quickcheck_tests};
use crate::{
    BraceBalanced, EmbeddedGrammar, FirstBrace, LexState, Lexer, LexerOptions, Token, TokenKind,
    TokenizedDocument,
};

/// Scans `text` one line at a time, threading the state through.
fn scan_lines<E: EmbeddedGrammar>(lexer: &Lexer<E>, text: &str) -> (Vec<Vec<Token>>, LexState) {
    let mut state = LexState::new();
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let out = lexer.scan_line(&state, line);
        lines.push(out.tokens);
        state = out.state;
    }
    (lines, state)
}

/// Checks that `tokens` are non-empty, in order, on char boundaries, with no
/// gap, no overlap and no two neighbors of the same kind.
fn partitions(line: &str, tokens: &[Token]) -> bool {
    let mut pos = 0;
    let mut last = None;
    for token in tokens {
        if token.start != pos
            || token.is_empty()
            || !line.is_char_boundary(token.end)
            || last == Some(token.kind)
        {
            return false;
        }
        pos = token.end;
        last = Some(token.kind);
    }
    pos == line.len()
}

/// One kind per character of `line`, skipping line feeds.
fn char_kinds(line: &str, tokens: &[Token], out: &mut Vec<TokenKind>) {
    for token in tokens {
        out.extend(
            token
                .text(line)
                .chars()
                .filter(|&ch| ch != '\n')
                .map(|_| token.kind),
        );
    }
}

fn resumable<E: EmbeddedGrammar>(lexer: &Lexer<E>, text: &str) -> bool {
    let (lines, state) = scan_lines(lexer, text);
    let mut per_line = Vec::new();
    for (line, tokens) in text.split('\n').zip(&lines) {
        char_kinds(line, tokens, &mut per_line);
    }

    let whole = lexer.scan_line(&LexState::new(), text);
    let mut single = Vec::new();
    char_kinds(text, &whole.tokens, &mut single);

    per_line == single && state == whole.state
}

/// Property: tokens exactly cover every line, whatever the input and state.
#[test]
fn tokens_partition_every_line() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: Fragments, options: LexerOptions) -> bool {
        let lexer = Lexer::new(options);
        let (lines, _) = scan_lines(&lexer, &text.0);
        text.0
            .split('\n')
            .zip(&lines)
            .all(|(line, tokens)| partitions(line, tokens))
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Fragments, LexerOptions) -> bool);
}

/// Property: the same `(state, line)` always gives the same result.
#[test]
fn scanning_is_deterministic() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(prefix: Fragments, line: Fragments) -> bool {
        let lexer = Lexer::new(LexerOptions::default());
        let (_, state) = scan_lines(&lexer, &prefix.0);
        let line = line.0.replace('\n', " ");
        lexer.scan_line(&state, &line) == lexer.scan_line(&state.clone(), &line)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Fragments, Fragments) -> bool);
}

/// Property: scanning line by line classifies every character the same way
/// as one pass over the whole text, and ends in the same state.
#[test]
fn line_by_line_matches_single_pass() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: Fragments, options: LexerOptions, first_brace: bool) -> bool {
        if first_brace {
            resumable(&Lexer::with_embedded(options, FirstBrace), &text.0)
        } else {
            resumable(&Lexer::with_embedded(options, BraceBalanced), &text.0)
        }
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Fragments, LexerOptions, bool) -> bool);
}

/// Property: a well-formed document ends where it started, with nothing
/// classified as invalid along the way.
#[test]
fn well_formed_documents_balance() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: WellFormed) -> bool {
        let lexer = Lexer::new(LexerOptions::default());
        let (lines, state) = scan_lines(&lexer, &doc.0);
        let clean = lines.iter().flatten().all(|t| {
            !matches!(t.kind, TokenKind::Invalid | TokenKind::StringEscapeInvalid)
        });
        clean && state.is_initial() && resumable(&lexer, &doc.0)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(WellFormed) -> bool);
}

/// Property: after any sequence of edits, the cached tokens and states equal
/// those of a document built from scratch with the same lines.
#[test]
fn incremental_edits_match_fresh_scan() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(initial: Fragments, edits: Vec<Edit>) -> bool {
        let lexer = Lexer::new(LexerOptions::default());
        let mut doc = TokenizedDocument::new(lexer.clone(), &initial.0);
        for edit in edits {
            let len = doc.line_count();
            let applied = match edit {
                Edit::Replace(_, _) if len == 0 => continue,
                Edit::Replace(at, text) => doc.replace_line(at % len, text),
                Edit::Insert(at, lines) => doc.insert_lines(at % (len + 1), lines),
                Edit::Remove(at, count) => {
                    let start = at % (len + 1);
                    doc.remove_lines(start..(start + count).min(len))
                }
            };
            if applied.is_err() {
                return false;
            }
        }

        let fresh = TokenizedDocument::from_lines(lexer, doc.lines().map(|(text, _)| text));
        doc.lines().eq(fresh.lines())
            && (0..=doc.line_count()).all(|i| doc.state_before(i) == fresh.state_before(i))
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Fragments, Vec<Edit>) -> bool);
}
