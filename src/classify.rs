//! Character-class predicates used by the segmenter and tokenizer cascades.
//!
//! All predicates are pure functions over single code points and cover the
//! full Unicode repertoire for their class, not just ASCII: the terminal set
//! includes the ideographic full stop and the small/fullwidth forms, and the
//! hyphen set covers every word-breaking dash code point.

/// Characters that may end a sentence: `.` `!` `?`, the ellipsis, the
/// doubled/interrobang forms, the ideographic full stop, and the small and
/// fullwidth variants of all of these.
pub fn is_terminal_marker(ch: char) -> bool {
    matches!(
        ch,
        '.' | '!'
            | '?'
            | '\u{2026}' // …
            | '\u{203C}' // ‼
            | '\u{203D}' // ‽
            | '\u{2047}' // ⁇
            | '\u{2048}' // ⁈
            | '\u{2049}' // ⁉
            | '\u{3002}' // 。
            | '\u{FE52}' // ﹒
            | '\u{FE57}' // ﹗
            | '\u{FF01}' // ！
            | '\u{FF0E}' // ．
            | '\u{FF1F}' // ？
            | '\u{FF61}' // ｡
    )
}

/// The subset of terminal markers that are full-stop variants. Only these
/// participate in the abbreviation, initial, species, and date rules.
pub fn is_dot_marker(ch: char) -> bool {
    matches!(ch, '.' | '\u{3002}' | '\u{FE52}' | '\u{FF0E}' | '\u{FF61}')
}

pub fn is_open_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '\u{201C}' | '\u{2018}' | '\u{00AB}' | '\u{2039}')
}

pub fn is_close_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '\u{201D}' | '\u{2019}' | '\u{00BB}' | '\u{203A}')
}

pub fn is_quote(ch: char) -> bool {
    is_open_quote(ch) || is_close_quote(ch)
}

/// The closing counterpart of an opening bracket, or `None` if `ch` does not
/// open an enclosure.
pub fn matching_bracket(ch: char) -> Option<char> {
    match ch {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '\u{FF08}' => Some('\u{FF09}'), // （）
        '\u{FF3B}' => Some('\u{FF3D}'), // ［］
        '\u{FF5B}' => Some('\u{FF5D}'), // ｛｝
        _ => None,
    }
}

pub fn is_open_bracket(ch: char) -> bool {
    matching_bracket(ch).is_some()
}

pub fn is_close_bracket(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}' | '\u{FF09}' | '\u{FF3D}' | '\u{FF5D}')
}

/// Any valid word-breaking hyphen, including the ASCII hyphen-minus.
pub fn is_dash(ch: char) -> bool {
    matches!(
        ch,
        '-' | '\u{00AD}'
            | '\u{058A}'
            | '\u{05BE}'
            | '\u{0F0C}'
            | '\u{1400}'
            | '\u{1806}'
            | '\u{2010}'..='\u{2012}'
            | '\u{2E17}'
            | '\u{30A0}'
    )
}

/// Apostrophe-like marks, including the ASCII single quote and the prime.
pub fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{00B4}' | '\u{02B9}' | '\u{02BC}' | '\u{2019}' | '\u{2032}')
}

pub fn is_superscript_digit(ch: char) -> bool {
    matches!(ch, '\u{00B9}' | '\u{00B2}' | '\u{00B3}' | '\u{2070}' | '\u{2074}'..='\u{2079}')
}

pub fn is_subscript_digit(ch: char) -> bool {
    matches!(ch, '\u{2080}'..='\u{2089}')
}

/// Superscript and subscript plus/minus signs that may prefix a script-digit
/// run (`⁻¹`, `₋₂`).
pub fn is_script_sign(ch: char) -> bool {
    matches!(ch, '\u{207A}' | '\u{207B}' | '\u{208A}' | '\u{208B}')
}

fn is_script(ch: char) -> bool {
    is_superscript_digit(ch) || is_subscript_digit(ch) || is_script_sign(ch)
}

/// Alphanumeric for tokenization purposes: Unicode letters plus decimal and
/// letter numbers. Sub/superscript digits and vulgar fractions are *not*
/// alphanumeric here, so `m³` splits into an alnum run and a symbol run.
pub fn is_alnum(ch: char) -> bool {
    if is_script(ch) || matches!(ch, '\u{00BC}'..='\u{00BE}') {
        return false;
    }
    ch.is_alphabetic() || ch.is_numeric()
}

pub fn is_upper(ch: char) -> bool {
    ch.is_uppercase()
}

pub fn is_lower(ch: char) -> bool {
    ch.is_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_markers_cover_unicode_variants() {
        for ch in ['.', '!', '?', '…', '。', '！', '．', '｡'] {
            assert!(is_terminal_marker(ch), "{ch} should be a terminal marker");
        }
        for ch in [',', ';', ':', 'a', ' ', '-'] {
            assert!(!is_terminal_marker(ch), "{ch} should not be a terminal marker");
        }
    }

    #[test]
    fn dot_markers_are_terminal_subset() {
        for ch in ['.', '。', '．'] {
            assert!(is_dot_marker(ch));
            assert!(is_terminal_marker(ch));
        }
        assert!(!is_dot_marker('!'));
        assert!(!is_dot_marker('?'));
    }

    #[test]
    fn bracket_pairs_match() {
        assert_eq!(matching_bracket('('), Some(')'));
        assert_eq!(matching_bracket('['), Some(']'));
        assert_eq!(matching_bracket('{'), Some('}'));
        assert_eq!(matching_bracket(')'), None);
        assert!(is_close_bracket(')'));
        assert!(!is_close_bracket('('));
    }

    #[test]
    fn quotes() {
        assert!(is_open_quote('\u{201C}'));
        assert!(is_close_quote('\u{201D}'));
        assert!(is_quote('"'));
        assert!(is_quote('\''));
        assert!(!is_quote('`'));
    }

    #[test]
    fn dashes_include_unicode_hyphens() {
        for ch in ['-', '\u{2010}', '\u{2011}', '\u{2012}', '\u{00AD}'] {
            assert!(is_dash(ch), "{ch:?} should be a dash");
        }
        assert!(!is_dash('\u{2014}')); // em dash is not a word-breaking hyphen
        assert!(!is_dash('_'));
    }

    #[test]
    fn script_digits_are_not_alnum() {
        assert!(is_superscript_digit('³'));
        assert!(is_subscript_digit('₂'));
        assert!(is_script_sign('⁻'));
        assert!(!is_alnum('³'));
        assert!(!is_alnum('₂'));
        assert!(!is_alnum('½'));
    }

    #[test]
    fn alnum_covers_letters_and_digits() {
        for ch in ['a', 'Z', '0', '9', 'ä', 'Ж', '世', '٣'] {
            assert!(is_alnum(ch), "{ch} should be alnum");
        }
        for ch in ['-', '.', ' ', '\'', '/', '%'] {
            assert!(!is_alnum(ch), "{ch} should not be alnum");
        }
    }

    #[test]
    fn case_predicates() {
        assert!(is_upper('A'));
        assert!(is_lower('a'));
        assert!(!is_upper('a'));
        assert!(!is_lower('1'));
    }
}
