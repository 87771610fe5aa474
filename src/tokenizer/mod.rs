//! Tokenization pipeline: maximal split, merge-back passes, web-shape
//! re-merging, and possessive/contraction post-processing.
//!
//! Every stage consumes the token sequence of the previous one. Tokens
//! borrow from the input text except where a merge drops interior whitespace
//! (hyphen-break joins), in which case the text becomes owned while the span
//! still covers the full original range.

mod contraction;
mod possessive;
mod space;
mod symbol;
mod web;
mod word;

use std::borrow::Cow;

pub use self::contraction::split_contractions;
pub use self::possessive::split_possessive_markers;
pub use self::space::space_tokenizer;
pub use self::symbol::symbol_tokenizer;
pub use self::web::web_tokenizer;
pub use self::word::word_tokenizer;

use crate::classify;
use crate::span::Span;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Contains at least one letter.
    Word,
    /// Digits, possibly with word-internal separators ("192.168.1.0").
    Number,
    /// A run of non-alphanumeric characters.
    Symbol,
    /// A re-merged URL or e-mail address.
    Composite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub span: Span,
    pub text: Cow<'a, str>,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    /// A token borrowing `source[span]`.
    pub(crate) fn borrowed(source: &'a str, span: Span, kind: TokenKind) -> Self {
        Token { span, text: Cow::Borrowed(span.slice(source)), kind }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this token directly abuts `next` in the source, with no
    /// separator between them.
    pub(crate) fn adjacent_to(&self, next: &Token<'_>) -> bool {
        self.span.end == next.span.start
    }

    pub(crate) fn is_alnum_kind(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::Number)
    }

    /// The single character of a one-char token, if it is one.
    pub(crate) fn single_char(&self) -> Option<char> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    /// Split off the last `suffix_bytes` bytes of the text as a second
    /// token. The suffix always lies at the end of the source range, so the
    /// span split holds even for owned (hyphen-merged) text.
    pub(crate) fn split_suffix(self, suffix_bytes: usize) -> (Token<'a>, Token<'a>) {
        let cut = self.span.end - suffix_bytes;
        let (stem_text, suffix_text): (Cow<'a, str>, Cow<'a, str>) = match self.text {
            Cow::Borrowed(text) => {
                let (stem, suffix) = text.split_at(text.len() - suffix_bytes);
                (Cow::Borrowed(stem), Cow::Borrowed(suffix))
            }
            Cow::Owned(mut text) => {
                let suffix = text.split_off(text.len() - suffix_bytes);
                (Cow::Owned(text), Cow::Owned(suffix))
            }
        };
        let stem_kind = classify_token(&stem_text);
        let suffix_kind = classify_token(&suffix_text);
        (
            Token { span: Span::new(self.span.start, cut), text: stem_text, kind: stem_kind },
            Token { span: Span::new(cut, self.span.end), text: suffix_text, kind: suffix_kind },
        )
    }
}

/// Kind of a (possibly merged) token: `Word` if any letter is present,
/// `Number` for digits with at most word-internal separators, `Symbol`
/// otherwise.
pub(crate) fn classify_token(text: &str) -> TokenKind {
    let mut has_letter = false;
    let mut has_digit = false;
    for ch in text.chars() {
        if classify::is_alnum(ch) {
            if ch.is_numeric() {
                has_digit = true;
            } else {
                has_letter = true;
            }
        }
    }
    if has_letter {
        TokenKind::Word
    } else if has_digit {
        TokenKind::Number
    } else {
        TokenKind::Symbol
    }
}

/// Shape shared by the possessive and contraction splitters: alphanumeric
/// runs joined by single word-internal dashes or apostrophes, starting and
/// ending alphanumeric.
pub(crate) fn is_splittable_stem(text: &str) -> bool {
    let mut prev_was_separator = true; // leading separator is invalid
    let mut seen_alnum = false;
    for ch in text.chars() {
        if classify::is_alnum(ch) {
            prev_was_separator = false;
            seen_alnum = true;
        } else if classify::is_dash(ch) || classify::is_apostrophe(ch) {
            if prev_was_separator {
                return false;
            }
            prev_was_separator = true;
        } else {
            return false;
        }
    }
    seen_alnum && !prev_was_separator
}
