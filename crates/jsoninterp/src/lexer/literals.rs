//! Recognizers for the fixed-shape lexemes: numbers, keywords and escapes.
//!
//! Each takes the unread bytes of the line and returns the byte length of the
//! lexeme at the start, if there is one. All matches are ASCII.

/// Longest JSON number at the start of `input`:
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
///
/// A fraction or exponent that is not followed by a digit is not part of the
/// number, so `1.` matches `1` and `2e+` matches `2`.
pub(crate) fn number_len(input: &[u8]) -> Option<usize> {
    let at = |i: usize| input.get(i).copied();
    let digits_from = |mut i: usize| {
        while at(i).is_some_and(|b| b.is_ascii_digit()) {
            i += 1;
        }
        i
    };

    let mut len = usize::from(at(0) == Some(b'-'));
    match at(len) {
        Some(b'0') => len += 1,
        Some(b'1'..=b'9') => len = digits_from(len + 1),
        _ => return None,
    }

    if at(len) == Some(b'.') && at(len + 1).is_some_and(|b| b.is_ascii_digit()) {
        len = digits_from(len + 2);
    }

    if matches!(at(len), Some(b'e' | b'E')) {
        let mut exp = len + 1;
        if matches!(at(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if at(exp).is_some_and(|b| b.is_ascii_digit()) {
            len = digits_from(exp + 1);
        }
    }

    Some(len)
}

/// `true`, `false` or `null` at the start of `input`.
///
/// Matching is by prefix: `nullable` yields `null` and leaves `able` to the
/// caller.
pub(crate) fn keyword_len(input: &[u8]) -> Option<usize> {
    const KEYWORDS: [&[u8]; 3] = [b"true", b"false", b"null"];
    KEYWORDS
        .iter()
        .find(|kw| input.starts_with(kw))
        .map(|kw| kw.len())
}

/// Recognized escape sequence at the start of `input`, which must begin with
/// a backslash: `\"` `\\` `\/` `\b` `\f` `\n` `\r` `\t` or `\u` plus four hex
/// digits.
pub(crate) fn escape_len(input: &[u8]) -> Option<usize> {
    debug_assert_eq!(input.first(), Some(&b'\\'));
    match input.get(1)? {
        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Some(2),
        b'u' => {
            let hex = input.get(2..6)?;
            hex.iter().all(u8::is_ascii_hexdigit).then_some(6)
        }
        _ => None,
    }
}
