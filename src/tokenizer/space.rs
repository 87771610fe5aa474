//! Whitespace-only splitting.

use crate::span::Span;

use super::{classify_token, Token};

/// Split `text` at Unicode whitespace, nothing else. Useful as a baseline
/// and for re-tokenizing output that is already space-joined; the heavier
/// stages start from [`symbol_tokenizer`](super::symbol_tokenizer) instead.
pub fn space_tokenizer(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        match (run_start, ch.is_whitespace()) {
            (None, false) => run_start = Some(i),
            (Some(start), true) => {
                tokens.push(chunk(text, start, i));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        tokens.push(chunk(text, start, text.len()));
    }
    tokens
}

fn chunk(text: &str, start: usize, end: usize) -> Token<'_> {
    let span = Span::new(start, end);
    Token::borrowed(text, span, classify_token(span.slice(text)))
}
