//! Splitting English verb contractions off word tokens.

use crate::classify;

use super::{is_splittable_stem, Token, TokenKind};

/// Contracted verb forms, as they appear after the last apostrophe.
const SUFFIXES: &[&str] = &["d", "ll", "m", "re", "s", "t", "ve"];

/// Split English verb contractions off their stems: `We'll` becomes `We`
/// and `'ll`, `isn't` becomes `is` and `n't`.
///
/// Only the last apostrophe is considered, so names with internal
/// apostrophes keep them (`O\u{2019}Hara\u{2019}s` splits into
/// `O\u{2019}Hara` and `\u{2019}s`). The `t` suffix only splits as `n't`,
/// keeping the `n` with the particle.
pub fn split_contractions(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match contraction_suffix(&token) {
            Some(suffix_bytes) => {
                let (stem, particle) = token.split_suffix(suffix_bytes);
                out.push(stem);
                out.push(particle);
            }
            None => out.push(token),
        }
    }
    out
}

/// Byte length of the contraction particle at the end of `token`, if any.
fn contraction_suffix(token: &Token<'_>) -> Option<usize> {
    if token.kind != TokenKind::Word {
        return None;
    }
    let text = token.text();
    let (apos_at, apos) = text
        .char_indices()
        .filter(|&(_, c)| classify::is_apostrophe(c))
        .next_back()?;
    let suffix = &text[apos_at + apos.len_utf8()..];
    if !SUFFIXES.contains(&suffix) {
        return None;
    }

    let mut suffix_bytes = apos.len_utf8() + suffix.len();
    let mut stem = &text[..apos_at];
    if suffix == "t" {
        // only n't splits, and the n goes with the particle
        stem = stem.strip_suffix('n')?;
        suffix_bytes += 1;
    }
    (!stem.is_empty() && is_splittable_stem(stem)).then_some(suffix_bytes)
}
