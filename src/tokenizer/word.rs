//! Word-level tokenization: the symbol baseline plus merge-back passes.

use std::borrow::Cow;

use tracing::debug;

use crate::classify;
use crate::lexicon::{Language, Lexicon};
use crate::span::Span;

use super::{classify_token, symbol_tokenizer, Token, TokenKind};

type MergePass = for<'a> fn(&'a str, Vec<Token<'a>>) -> Vec<Token<'a>>;

/// The merge passes in their fixed application order. Each is a single
/// left-to-right scan with local lookahead. Internal-punctuation joining
/// runs first so that dotted abbreviations ("i.e") exist as single tokens
/// before their trailing dot is reattached.
const MERGE_PASSES: &[(&str, MergePass)] = &[
    ("internal-punctuation", join_internal_punctuation),
    ("abbreviation-dot", reattach_abbreviation_dots),
    ("hyphen-break", collapse_hyphen_breaks),
    ("script-attachment", attach_script_digits),
];

/// Tokenize `text` into words, numbers, and symbol runs.
///
/// Runs [`symbol_tokenizer`] and then the merge passes, which re-join
/// punctuation with adjacent alphanumeric spans:
///
/// 1. Dots, dashes, apostrophes, and commas directly between alphanumerics
///    stay word-internal ("192.168.1.0", "catch-up", "That's", "1,r-4");
///    colons join digits on both sides ("12:30"). Ellipses never join.
/// 2. A lone dot after a known abbreviation is reattached ("Mr" + "." ⇒
///    "Mr."). A sentence-terminal dot after an ordinary word stays its own
///    token.
/// 3. A hyphen at a line break re-joins the broken word, dropping the
///    interior whitespace ("Hel- \n lo" ⇒ "Hel-lo").
/// 4. Sub/superscript digit runs, optionally sign-prefixed, attach to the
///    preceding alphanumeric token ("m" + "⁻¹" ⇒ "m⁻¹", "O" + "₂" ⇒ "O₂").
///
/// Re-tokenizing the whitespace-joined output yields the same sequence.
pub fn word_tokenizer(text: &str) -> Vec<Token<'_>> {
    let mut tokens = symbol_tokenizer(text);
    for (name, pass) in MERGE_PASSES {
        tokens = pass(text, tokens);
        debug!(pass = name, tokens = tokens.len(), "merge pass applied");
    }
    tokens
}

/// Pass 1: merge `alnum (punct alnum)+` runs where every element abuts the
/// next in the source.
fn join_internal_punctuation<'a>(source: &'a str, tokens: Vec<Token<'a>>) -> Vec<Token<'a>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if !tokens[i].is_alnum_kind() {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        }

        let start = tokens[i].span.start;
        let mut end = tokens[i].span.end;
        let mut last = i;
        while last + 2 < tokens.len() {
            let punct = &tokens[last + 1];
            let word = &tokens[last + 2];
            if punct.span.start != end || !punct.adjacent_to(word) || !word.is_alnum_kind() {
                break;
            }
            if !joins_internally(source, punct, end) {
                break;
            }
            end = word.span.end;
            last += 2;
        }

        // a trailing apostrophe stays attached after a final `s`
        // ("Words'"), and non-ASCII apostrophes attach unconditionally
        // ("less\u{02BC}")
        if last + 1 < tokens.len() {
            let tail = &tokens[last + 1];
            if tail.span.start == end
                && tail.single_char().is_some_and(classify::is_apostrophe)
                && !tokens.get(last + 2).is_some_and(|t| tail.adjacent_to(t) && t.is_alnum_kind())
            {
                let attaches = tail.single_char() != Some('\'')
                    || source[..end].ends_with(['s', 'S']);
                if attaches {
                    end = tail.span.end;
                    last += 1;
                }
            }
        }

        if last > i {
            let span = Span::new(start, end);
            out.push(Token::borrowed(source, span, classify_token(span.slice(source))));
        } else {
            out.push(tokens[i].clone());
        }
        i = last + 1;
    }
    out
}

fn joins_internally(source: &str, punct: &Token<'_>, prev_end: usize) -> bool {
    let Some(ch) = punct.single_char() else {
        // of the longer runs ("...", "--", ".,") only apostrophe-hyphen
        // joins, for primed chemical bonds ("5\u{2032}-ATGCAAAT")
        let mut chars = punct.text().chars();
        return match (chars.next(), chars.next(), chars.next()) {
            (Some(apos), Some(dash), None) => {
                classify::is_apostrophe(apos) && classify::is_dash(dash)
            }
            _ => false,
        };
    };
    match ch {
        '.' | ',' => true,
        ':' => {
            // colons only join digits ("12:30"), not words
            source[..prev_end].ends_with(|c: char| c.is_ascii_digit())
                && source[punct.span.end..].starts_with(|c: char| c.is_ascii_digit())
        }
        c => classify::is_dash(c) || classify::is_apostrophe(c),
    }
}

/// Pass 2: a dot directly after a known abbreviation merges into it. The dot
/// may lead a longer symbol run (".," in "f.e., it"); the rest of the run
/// stays behind as its own token.
fn reattach_abbreviation_dots<'a>(source: &'a str, tokens: Vec<Token<'a>>) -> Vec<Token<'a>> {
    let lexicon = Lexicon::for_language(Language::Generic);
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let reattach = token.kind == TokenKind::Word
            && lexicon.is_abbreviation(token.text())
            && tokens.get(i + 1).is_some_and(|run| {
                token.adjacent_to(run)
                    && run.kind == TokenKind::Symbol
                    && run.text().starts_with('.')
                    && !run.text().starts_with("..")
            });
        if reattach {
            let run = &tokens[i + 1];
            let dot_end = run.span.start + 1;
            out.push(Token::borrowed(source, Span::new(token.span.start, dot_end), TokenKind::Word));
            if dot_end < run.span.end {
                out.push(Token::borrowed(source, Span::new(dot_end, run.span.end), TokenKind::Symbol));
            }
            i += 2;
        } else {
            out.push(token.clone());
            i += 1;
        }
    }
    out
}

/// Pass 3: `word-` at a line end re-joins the continuation word on the next
/// line, dropping the interior whitespace (and a duplicated leading hyphen).
fn collapse_hyphen_breaks<'a>(source: &'a str, tokens: Vec<Token<'a>>) -> Vec<Token<'a>> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let joined = try_hyphen_break(source, &tokens, i);
        match joined {
            Some((token, consumed)) => {
                out.push(token);
                i += consumed;
            }
            None => {
                out.push(tokens[i].clone());
                i += 1;
            }
        }
    }
    out
}

fn try_hyphen_break<'a>(
    source: &'a str,
    tokens: &[Token<'a>],
    i: usize,
) -> Option<(Token<'a>, usize)> {
    let word = tokens.get(i)?;
    let dash = tokens.get(i + 1)?;
    if !word.is_alnum_kind()
        || !word.adjacent_to(dash)
        || !dash.single_char().is_some_and(classify::is_dash)
    {
        return None;
    }

    // the gap must be pure whitespace containing a line break
    let mut next_idx = i + 2;
    let mut next = tokens.get(next_idx)?;
    let gap = &source[dash.span.end..next.span.start];
    if gap.is_empty() || !gap.chars().all(char::is_whitespace) {
        return None;
    }
    if !gap.contains(['\n', '\r', '\u{2028}']) {
        return None;
    }

    // optional duplicated hyphen at the start of the next line
    if next.single_char().is_some_and(classify::is_dash) {
        let after = tokens.get(next_idx + 1)?;
        if !next.adjacent_to(after) {
            return None;
        }
        next_idx += 1;
        next = after;
    }
    if !next.is_alnum_kind() {
        return None;
    }

    let mut text = String::with_capacity(word.text.len() + dash.text.len() + next.text.len());
    text.push_str(&word.text);
    text.push_str(&dash.text);
    text.push_str(&next.text);
    let kind = classify_token(&text);
    let token =
        Token { span: Span::new(word.span.start, next.span.end), text: Cow::Owned(text), kind };
    Some((token, next_idx + 1 - i))
}

/// Pass 4: an optionally sign-prefixed run of sub/superscript digits
/// attaches to the preceding alphanumeric token. Alphanumerics directly
/// after an attached run merge too, so formulas like "H₁₂Si₅O₂" chain into
/// one token.
fn attach_script_digits<'a>(source: &'a str, tokens: Vec<Token<'a>>) -> Vec<Token<'a>> {
    let mut out: Vec<Token<'a>> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let adjacent = out.last().is_some_and(|prev| prev.adjacent_to(&token));
        if adjacent && token.kind == TokenKind::Symbol && prev_is_alnum(&out) {
            if let Some(prefix_end) = script_prefix_end(token.text()) {
                if let Some(prev) = out.pop() {
                    let attach_end = token.span.start + prefix_end;
                    out.push(merge_pair(source, &prev, &token.text()[..prefix_end], attach_end));
                    if prefix_end < token.text.len() {
                        let rest = Span::new(attach_end, token.span.end);
                        out.push(Token::borrowed(source, rest, TokenKind::Symbol));
                    }
                    continue;
                }
            }
        }
        if adjacent && token.is_alnum_kind() && prev_ends_in_script(&out) {
            if let Some(prev) = out.pop() {
                out.push(merge_pair(source, &prev, token.text(), token.span.end));
                continue;
            }
        }
        out.push(token);
    }
    out
}

fn merge_pair<'a>(source: &'a str, prev: &Token<'a>, tail: &str, end: usize) -> Token<'a> {
    let span = Span::new(prev.span.start, end);
    match &prev.text {
        Cow::Borrowed(_) => Token::borrowed(source, span, classify_token(span.slice(source))),
        Cow::Owned(text) => {
            let mut text = text.clone();
            text.push_str(tail);
            let kind = classify_token(&text);
            Token { span, text: Cow::Owned(text), kind }
        }
    }
}

fn prev_is_alnum(out: &[Token<'_>]) -> bool {
    out.last().is_some_and(Token::is_alnum_kind)
}

fn prev_ends_in_script(out: &[Token<'_>]) -> bool {
    out.last().is_some_and(|prev| {
        prev.text().chars().next_back().is_some_and(|c| {
            classify::is_superscript_digit(c)
                || classify::is_subscript_digit(c)
                || classify::is_script_sign(c)
        })
    })
}

/// Byte length of the leading `sign? digit+ sign?` script run of a symbol
/// token, if it has one.
fn script_prefix_end(text: &str) -> Option<usize> {
    let mut end = 0;
    let mut digits = 0;
    let mut chars = text.char_indices().peekable();

    if let Some(&(_, ch)) = chars.peek() {
        if classify::is_script_sign(ch) {
            chars.next();
            end = ch.len_utf8();
        }
    }
    while let Some(&(idx, ch)) = chars.peek() {
        if classify::is_superscript_digit(ch) || classify::is_subscript_digit(ch) {
            chars.next();
            end = idx + ch.len_utf8();
            digits += 1;
        } else {
            break;
        }
    }
    if digits == 0 {
        return None;
    }
    // trailing ionization sign ("₄²⁺" style endings)
    if let Some(&(idx, ch)) = chars.peek() {
        if classify::is_script_sign(ch) {
            end = idx + ch.len_utf8();
        }
    }
    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &'a [Token<'_>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text()).collect()
    }

    fn test_with_inner(inner: char) {
        let input = format!(" 123{inner}456 abc{inner}def ");
        let expected = [format!("123{inner}456"), format!("abc{inner}def")];
        assert_eq!(texts(&word_tokenizer(&input)), expected);
    }

    #[test]
    fn inner_hyphen() {
        test_with_inner('-');
    }

    #[test]
    fn inner_comma() {
        test_with_inner(',');
    }

    #[test]
    fn inner_dot() {
        test_with_inner('.');
    }

    #[test]
    fn inner_colon_only_joins_digits() {
        assert_eq!(texts(&word_tokenizer("12:6 12:50")), ["12:6", "12:50"]);
        assert_eq!(
            texts(&word_tokenizer("abc:def abc:12")),
            ["abc", ":", "def", "abc", ":", "12"]
        );
    }

    fn test_dangling(ch: char) {
        let input = format!("that {ch}but not{ch} this");
        let expected = ["that", &ch.to_string(), "but", "not", &ch.to_string(), "this"];
        assert_eq!(texts(&word_tokenizer(&input)), expected);
    }

    #[test]
    fn dangling_hyphen() {
        test_dangling('-');
    }

    #[test]
    fn dangling_comma() {
        test_dangling(',');
    }

    #[test]
    fn hyphen_repeat_stays_split() {
        assert_eq!(texts(&word_tokenizer("A--B")), ["A", "--", "B"]);
    }

    #[test]
    fn ip_address_is_one_number() {
        let tokens = word_tokenizer("192.168.1.0");
        assert_eq!(texts(&tokens), ["192.168.1.0"]);
        assert_eq!(tokens[0].kind, TokenKind::Number);
    }

    #[test]
    fn hyphened_numbers_and_times() {
        assert_eq!(texts(&word_tokenizer("1-1-1:2:2")), ["1-1-1:2:2"]);
    }

    #[test]
    fn unicode_hyphen_joins() {
        let input = "\u{00A0}ABC\u{2011}DEF\u{2015}XYZ\u{00A0}";
        let expected = ["ABC\u{2011}DEF", "\u{2015}", "XYZ"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn mixed_case_hyphen_chain() {
        assert_eq!(texts(&word_tokenizer("123-Abc-xyZ-123")), ["123-Abc-xyZ-123"]);
    }

    #[test]
    fn hyphen_linebreak_collapses() {
        let input = "A-\rB A-\nB A-  \r\n\tB";
        assert_eq!(texts(&word_tokenizer(input)), ["A-B", "A-B", "A-B"]);
        // spans still cover the original ranges
        let tokens = word_tokenizer("Hel- \n lo");
        assert_eq!(texts(&tokens), ["Hel-lo"]);
        assert_eq!(tokens[0].span, Span::new(0, 9));
    }

    #[test]
    fn hyphen_without_linebreak_stays_split() {
        assert_eq!(texts(&word_tokenizer("Hel- lo")), ["Hel", "-", "lo"]);
    }

    #[test]
    fn abbreviation_dot_reattaches() {
        let input = "\t1.2.3, f.e., is Mr. .Abbreviation.\n";
        let expected = ["1.2.3", ",", "f.e.", ",", "is", "Mr.", ".", "Abbreviation", "."];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn terminal_dot_stays_split() {
        assert_eq!(texts(&word_tokenizer("This is it.")), ["This", "is", "it", "."]);
    }

    #[test]
    fn ellipsis_never_joins() {
        assert_eq!(texts(&word_tokenizer("and...or")), ["and", "...", "or"]);
        assert_eq!(texts(&word_tokenizer("Please no more...")), ["Please", "no", "more", "..."]);
    }

    #[test]
    fn apostrophes() {
        let input = "That's 'tis less' O'Don'Ovan's";
        let expected = ["That's", "'", "tis", "less'", "O'Don'Ovan's"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn possessive_s_ascii_apostrophe() {
        assert_eq!(texts(&word_tokenizer("Words' end.")), ["Words'", "end", "."]);
    }

    #[test]
    fn apostrophe_unicode() {
        let input = "less\u{02BC} O\u{2019}Neil\u{02BC}s";
        let expected = ["less\u{02BC}", "O\u{2019}Neil\u{02BC}s"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn hyphen_dot_apostrophe_combined() {
        let input = " O.h'Ne.l- \n l's ";
        assert_eq!(texts(&word_tokenizer(input)), ["O.h'Ne.l-l's"]);
    }

    #[test]
    fn numbers_and_units() {
        let input = "$123,456.99 45.67+/-1.23%";
        let expected = ["$", "123,456.99", "45.67", "+/-", "1.23", "%"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn chemicals_and_dna() {
        let input = "1,r-4-cyclo.hexene 5\u{2032}-ATGCAAAT-3\u{2032}";
        let expected = ["1,r-4-cyclo.hexene", "5\u{2032}-ATGCAAAT-3\u{2032}"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn superscript_dimensions() {
        let input = "10 V\u{00B7}m⁻¹ msec²";
        let expected = ["10", "V", "\u{00B7}", "m⁻¹", "msec²"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn subscript_chemistry() {
        let input = "O₂ H₁₂Si₅O₂";
        let expected = ["O₂", "H₁₂Si₅O₂"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn script_run_with_trailing_symbol() {
        // only the script prefix of the symbol run attaches
        let tokens = word_tokenizer("m⁻¹,");
        assert_eq!(texts(&tokens), ["m⁻¹", ","]);
    }

    #[test]
    fn url_is_split_at_word_level() {
        let input = "http://www.example.com/path/to.file?kwd=1&arg";
        let expected =
            ["http", "://", "www.example.com", "/", "path", "/", "to.file", "?", "kwd", "=", "1", "&", "arg"];
        assert_eq!(texts(&word_tokenizer(input)), expected);
    }

    #[test]
    fn idempotent_over_own_output() {
        for input in [
            "Hel- \n lo there, 192.168.1.0 i.e. m⁻¹ O₂ Words' That's catch-up",
            "$123,456.99 45.67+/-1.23% and...or",
        ] {
            let first: Vec<String> =
                word_tokenizer(input).iter().map(|t| t.text().to_owned()).collect();
            let joined = first.join(" ");
            let second: Vec<String> =
                word_tokenizer(&joined).iter().map(|t| t.text().to_owned()).collect();
            assert_eq!(first, second, "word_tokenizer not idempotent for {input:?}");
        }
    }
}
