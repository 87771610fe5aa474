//! Maximal-split baseline pass.

use crate::classify;
use crate::span::Span;

use super::{classify_token, Token, TokenKind};

/// Split `text` into alternating maximal alphanumeric and non-alphanumeric
/// runs, discarding whitespace. This stage intentionally over-splits; the
/// merge passes of [`word_tokenizer`](super::word_tokenizer) restore tokens
/// from it. Token spans tile the input: together with the whitespace gaps
/// between them they reconstruct the input exactly.
pub fn symbol_tokenizer(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    // current run: (start byte, is-alphanumeric)
    let mut run: Option<(usize, bool)> = None;

    for (i, ch) in text.char_indices() {
        let class = if ch.is_whitespace() { None } else { Some(classify::is_alnum(ch)) };
        match (run, class) {
            (None, Some(alnum)) => run = Some((i, alnum)),
            (Some((start, was_alnum)), Some(alnum)) if alnum != was_alnum => {
                tokens.push(run_token(text, start, i, was_alnum));
                run = Some((i, alnum));
            }
            (Some((start, was_alnum)), None) => {
                tokens.push(run_token(text, start, i, was_alnum));
                run = None;
            }
            _ => {}
        }
    }
    if let Some((start, was_alnum)) = run {
        tokens.push(run_token(text, start, text.len(), was_alnum));
    }
    tokens
}

fn run_token(text: &str, start: usize, end: usize, alnum: bool) -> Token<'_> {
    let span = Span::new(start, end);
    let kind = if alnum { classify_token(span.slice(text)) } else { TokenKind::Symbol };
    Token::borrowed(text, span, kind)
}
