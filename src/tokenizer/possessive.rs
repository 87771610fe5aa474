//! Splitting genitive markers off word tokens.

use crate::classify;

use super::{is_splittable_stem, Token, TokenKind};

/// Split English possessive markers off their stems: `Fred's` becomes
/// `Fred` and `'s`, `Charles'` becomes `Charles` and `'`.
///
/// All apostrophe variants are recognized. A marker only splits when the
/// remaining stem is a plain word shape, so contractions with other
/// suffixes (`Frank'd`) and bare `s'` are left alone.
pub fn split_possessive_markers(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match possessive_suffix(&token) {
            Some(suffix_bytes) => {
                let (stem, marker) = token.split_suffix(suffix_bytes);
                out.push(stem);
                out.push(marker);
            }
            None => out.push(token),
        }
    }
    out
}

/// Byte length of the possessive marker at the end of `token`, if any.
fn possessive_suffix(token: &Token<'_>) -> Option<usize> {
    if token.kind != TokenKind::Word {
        return None;
    }
    let mut rev = token.text().chars().rev();
    let last = rev.next()?;

    if classify::is_apostrophe(last) {
        // s-apostrophe form: the stem keeps its final s, and needs at least
        // one more letter before it ("Charles'", but not "s'")
        rev.next().filter(|c| matches!(c, 's' | 'S'))?;
        rev.next().filter(|&c| classify::is_alnum(c))?;
        let stem = &token.text()[..token.text.len() - last.len_utf8()];
        is_splittable_stem(stem).then(|| last.len_utf8())
    } else if matches!(last, 's' | 'S') {
        // apostrophe-s form
        let apos = rev.next().filter(|&c| classify::is_apostrophe(c))?;
        let suffix_bytes = apos.len_utf8() + last.len_utf8();
        let stem = &token.text()[..token.text.len() - suffix_bytes];
        (!stem.is_empty() && is_splittable_stem(stem)).then_some(suffix_bytes)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::super::word_tokenizer;
    use super::*;

    fn split(text: &str) -> Vec<String> {
        split_possessive_markers(word_tokenizer(text))
            .iter()
            .map(|t| t.text().to_owned())
            .collect()
    }

    #[test]
    fn apostrophe_s() {
        assert_eq!(split("Fred's dog"), ["Fred", "'s", "dog"]);
        assert_eq!(split("Frank\u{02BC}s car"), ["Frank", "\u{02BC}s", "car"]);
    }

    #[test]
    fn s_apostrophe() {
        assert_eq!(split("CHARLES' son"), ["CHARLES", "'", "son"]);
        assert_eq!(split("Charles\u{2019} son"), ["Charles", "\u{2019}", "son"]);
    }

    #[test]
    fn hyphenated_stem() {
        assert_eq!(split("the home-less\u{2032} shelter"), ["the", "home-less", "\u{2032}", "shelter"]);
    }

    #[test]
    fn not_a_possessive() {
        assert_eq!(split("Frank'd go"), ["Frank'd", "go"]);
        assert_eq!(split("the s' mark"), ["the", "s'", "mark"]);
        assert_eq!(split("it's"), ["it", "'s"]);
    }

    #[test]
    fn spans_still_tile() {
        let input = "Fred's dog";
        let tokens = split_possessive_markers(word_tokenizer(input));
        for token in &tokens {
            assert_eq!(token.span.slice(input), token.text());
        }
    }
}
