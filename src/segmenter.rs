//! Sentence boundary detection over well-edited prose.
//!
//! The segmenter works in two passes. A structural scan finds *candidate*
//! boundaries: a terminal marker, one optional close quote, any closing
//! brackets, followed by whitespace or end of text. Each candidate is then
//! run through an ordered cascade of exception rules; the first rule that
//! matches rejects the candidate, and a candidate no rule rejects is
//! confirmed. The cascade order is an explicit contract (see [`CASCADE`]),
//! biased towards under-splitting: when the evidence is weak, no boundary is
//! emitted.
//!
//! Known limitations:
//!
//! 1. A boundary requires a terminal marker followed by whitespace; headers
//!    and list items without terminal punctuation stay attached to their
//!    paragraph.
//! 2. Text with unbalanced quotes or brackets degrades to longer sentences,
//!    never to a failure.
//! 3. Windows (`\r\n`) and old Mac (`\r`) line breaks should be converted to
//!    `\n` before multi-line segmentation.

use tracing::debug;

use crate::classify;
use crate::lexicon::{Language, Lexicon};
use crate::span::Span;

/// One segmented sentence: a byte span into the input plus the text it
/// covers. Adjacent whitespace is excluded from the span but recoverable from
/// the gaps, so concatenating spans and gaps reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub span: Span,
    pub text: &'a str,
}

/// Configuration for [`split_multi`]; selects the abbreviation and
/// continuation-word lists.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SegmentConfig {
    pub language: Language,
}

/// Segment `text` line by line: every newline is a hard boundary and each
/// line is segmented independently, so a marker-free line comes back as one
/// sentence of its own.
pub fn split_single(text: &str) -> Vec<Sentence<'_>> {
    Segmenter::new(Lexicon::for_language(Language::Generic)).split_single(text)
}

/// Segment `text` paragraph-aware: two or more consecutive newlines are a
/// hard boundary that always splits, while a sentence may cross a single
/// newline inside a paragraph.
pub fn split_multi<'a>(text: &'a str, config: &SegmentConfig) -> Vec<Sentence<'a>> {
    Segmenter::new(Lexicon::for_language(config.language)).split_multi(text)
}

/// The boundary detector. Borrows the caller-owned [`Lexicon`]; a single
/// lexicon may back any number of concurrent segmenters.
pub struct Segmenter<'lex> {
    lexicon: &'lex Lexicon,
}

impl<'lex> Segmenter<'lex> {
    pub fn new(lexicon: &'lex Lexicon) -> Self {
        Segmenter { lexicon }
    }

    /// Line-by-line segmentation; see [`split_single`].
    pub fn split_single<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        debug!(bytes = text.len(), "line-by-line segmentation");
        let mut sentences = Vec::new();
        let mut line_start = 0;
        while let Some(offset) = text[line_start..].find('\n') {
            self.segment_fragment(text, line_start, line_start + offset, &mut sentences);
            line_start += offset + 1;
        }
        self.segment_fragment(text, line_start, text.len(), &mut sentences);
        sentences
    }

    /// Paragraph-aware segmentation; see [`split_multi`].
    pub fn split_multi<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        debug!(bytes = text.len(), "multi-line segmentation");
        let bytes = text.as_bytes();
        let mut sentences = Vec::new();
        let mut fragment_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'\n' {
                let run_start = i;
                let mut j = i + 1;
                while j < bytes.len() && bytes[j] == b'\n' {
                    j += 1;
                }
                if j - run_start >= 2 {
                    self.segment_fragment(text, fragment_start, run_start, &mut sentences);
                    fragment_start = j;
                }
                i = j;
            } else {
                i += 1;
            }
        }
        self.segment_fragment(text, fragment_start, bytes.len(), &mut sentences);
        sentences
    }

    /// Candidate scan plus exception cascade over `text[start..end]`.
    fn segment_fragment<'a>(
        &self,
        text: &'a str,
        start: usize,
        end: usize,
        out: &mut Vec<Sentence<'a>>,
    ) {
        let chars: Vec<(usize, char)> =
            text[start..end].char_indices().map(|(i, c)| (i + start, c)).collect();

        let mut enclosures = EnclosureStack::default();
        let mut sentence_start: Option<usize> = None;
        let mut last_content_end = start;
        let mut i = 0;

        while i < chars.len() {
            let (pos, ch) = chars[i];

            if sentence_start.is_none() {
                if ch.is_whitespace() {
                    i += 1;
                    continue;
                }
                sentence_start = Some(pos);
                enclosures.clear();
            }

            if classify::is_terminal_marker(ch) {
                // optional close quote, then any closing brackets
                let mut trailer_end = i + 1;
                if trailer_end < chars.len() && classify::is_close_quote(chars[trailer_end].1) {
                    trailer_end += 1;
                }
                while trailer_end < chars.len() && classify::is_close_bracket(chars[trailer_end].1)
                {
                    trailer_end += 1;
                }

                let at_text_end = trailer_end >= chars.len();
                if at_text_end || chars[trailer_end].1.is_whitespace() {
                    let sent_start = sentence_start.unwrap_or(pos);
                    let (next_word, next_word_dotted) =
                        following_word(text, &chars, trailer_end);
                    let candidate = Candidate {
                        marker: ch,
                        has_trailer: trailer_end > i + 1,
                        enclosed: enclosures.open_after(chars[i + 1..trailer_end].iter().map(|&(_, c)| c)),
                        prev_word: preceding_word(text, sent_start, pos),
                        next_word,
                        next_word_dotted,
                    };

                    match first_rejection(&candidate, self.lexicon) {
                        Some(rule) => {
                            debug!(rule, marker = %ch, "candidate boundary rejected");
                        }
                        None => {
                            let byte_end =
                                chars.get(trailer_end).map(|&(p, _)| p).unwrap_or(end);
                            out.push(Sentence {
                                span: Span::new(sent_start, byte_end),
                                text: &text[sent_start..byte_end],
                            });
                            sentence_start = None;
                            i = trailer_end;
                            continue;
                        }
                    }
                }
            }

            enclosures.observe(ch);
            if !ch.is_whitespace() {
                last_content_end = pos + ch.len_utf8();
            }
            i += 1;
        }

        // no confirmed boundary at the end: the remainder is one sentence
        if let Some(sent_start) = sentence_start {
            out.push(Sentence {
                span: Span::new(sent_start, last_content_end),
                text: &text[sent_start..last_content_end],
            });
        }
    }
}

/// Everything a cascade rule may consult about one candidate boundary.
struct Candidate<'a> {
    marker: char,
    /// The candidate consumed a trailing close quote or bracket.
    has_trailer: bool,
    /// An enclosure opened earlier in the sentence is still open after the
    /// trailers.
    enclosed: bool,
    /// The word directly before the marker, without the marker itself.
    prev_word: Option<&'a str>,
    /// The word after the candidate's whitespace.
    next_word: Option<&'a str>,
    /// The next word is itself followed directly by a dot marker, as in the
    /// second half of a dotted-abbreviation pair ("gen. nov.").
    next_word_dotted: bool,
}

type Rule = fn(&Candidate<'_>, &Lexicon) -> bool;

/// The ordered exception cascade. The first rule returning `true` rejects
/// the candidate; a candidate passing every rule is a confirmed boundary.
const CASCADE: &[(&str, Rule)] = &[
    ("enclosure", reject_enclosure),
    ("abbreviation", reject_abbreviation),
    ("date", reject_date),
    ("initial", reject_initial),
    ("species", reject_species),
    ("continuation", reject_continuation),
];

fn first_rejection(candidate: &Candidate<'_>, lexicon: &Lexicon) -> Option<&'static str> {
    CASCADE
        .iter()
        .find(|(_, rule)| rule(candidate, lexicon))
        .map(|&(name, _)| name)
}

/// The marker lies inside a quote or bracket opened earlier in the sentence;
/// the enclosure's own closing mark is judged when it is reached.
fn reject_enclosure(candidate: &Candidate<'_>, _: &Lexicon) -> bool {
    candidate.enclosed
}

/// The word before a dot marker is a known abbreviation ("Mr.", "i.e.").
fn reject_abbreviation(candidate: &Candidate<'_>, lexicon: &Lexicon) -> bool {
    classify::is_dot_marker(candidate.marker)
        && candidate.prev_word.is_some_and(|word| lexicon.is_abbreviation(word))
}

/// European-style date: a day number before the dot and a month word or
/// number after it ("24. Dezember 2016", "13. 1. 2006").
fn reject_date(candidate: &Candidate<'_>, lexicon: &Lexicon) -> bool {
    if !classify::is_dot_marker(candidate.marker) {
        return false;
    }
    let is_day = candidate.prev_word.is_some_and(|prev| {
        prev.len() <= 2 && prev.parse::<u8>().is_ok_and(|day| (1..=31).contains(&day))
    });
    is_day
        && candidate.next_word.is_some_and(|next| {
            lexicon.is_month(next) || next.starts_with(|c: char| c.is_ascii_digit())
        })
}

/// Personal or organizational initial: a single upper-case letter before the
/// dot and an upper-case word after it ("A. Dent", "F. M. Last").
fn reject_initial(candidate: &Candidate<'_>, _: &Lexicon) -> bool {
    classify::is_dot_marker(candidate.marker)
        && is_single_letter(candidate.prev_word, true)
        && candidate
            .next_word
            .is_some_and(|next| next.starts_with(classify::is_upper))
}

/// Genus-species pattern: a single letter (or "spp") before the dot and a
/// short lower-case word after it ("S. pombe", "m. musculus").
fn reject_species(candidate: &Candidate<'_>, _: &Lexicon) -> bool {
    if !classify::is_dot_marker(candidate.marker) {
        return false;
    }
    let abbreviated = is_single_letter(candidate.prev_word, false)
        || candidate.prev_word == Some("spp");
    abbreviated && candidate.next_word.is_some_and(is_short_lower_word)
}

/// The next word is an unlikely sentence starter: a lower-case continuation
/// word from the lexicon, any lower-case word when the candidate carried a
/// close quote or bracket ("Hello!" said the man), or the second half of a
/// dotted-abbreviation pair ("gen. nov.").
fn reject_continuation(candidate: &Candidate<'_>, lexicon: &Lexicon) -> bool {
    let Some(next) = candidate.next_word else {
        return false;
    };
    if lexicon.is_continuation(next) {
        return true;
    }
    let starts_lower = next.starts_with(|c: char| c.is_alphabetic() && classify::is_lower(c));
    starts_lower && (candidate.has_trailer || candidate.next_word_dotted)
}

fn is_single_letter(word: Option<&str>, upper_only: bool) -> bool {
    match word {
        Some(word) => {
            let mut chars = word.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c.is_alphabetic() && (!upper_only || classify::is_upper(c)),
                _ => false,
            }
        }
        None => false,
    }
}

fn is_short_lower_word(word: &str) -> bool {
    let mut count = 0;
    for (idx, ch) in word.chars().enumerate() {
        let ok = if idx == 0 {
            ch.is_alphabetic() && classify::is_lower(ch)
        } else {
            classify::is_lower(ch) || ch.is_ascii_digit() || classify::is_dash(ch)
        };
        if !ok {
            return false;
        }
        count += 1;
    }
    (1..=10).contains(&count)
}

/// The word directly preceding `marker`, scanning back over alphanumerics
/// and word-internal dots, dashes, and apostrophes ("i.e", "min-1", "U.S").
fn preceding_word(text: &str, sentence_start: usize, marker: usize) -> Option<&str> {
    let head = &text[sentence_start..marker];
    let mut word_start = head.len();
    for (idx, ch) in head.char_indices().rev() {
        if classify::is_alnum(ch)
            || ch == '.'
            || classify::is_dash(ch)
            || classify::is_apostrophe(ch)
        {
            word_start = idx;
        } else {
            break;
        }
    }
    let word = head[word_start..].trim_start_matches('.');
    (!word.is_empty()).then_some(word)
}

/// The word after the candidate, skipping the separating whitespace, plus
/// whether that word runs directly into a dot marker.
fn following_word<'a>(
    text: &'a str,
    chars: &[(usize, char)],
    from: usize,
) -> (Option<&'a str>, bool) {
    let mut k = from;
    while k < chars.len() && chars[k].1.is_whitespace() {
        k += 1;
    }
    let Some(&(word_start, _)) = chars.get(k) else {
        return (None, false);
    };
    let mut word_end = word_start;
    while k < chars.len() {
        let (pos, ch) = chars[k];
        if classify::is_alnum(ch) || classify::is_dash(ch) || classify::is_apostrophe(ch) {
            word_end = pos + ch.len_utf8();
            k += 1;
        } else {
            break;
        }
    }
    if word_end == word_start {
        return (None, false);
    }
    let dotted = chars.get(k).is_some_and(|&(_, ch)| classify::is_dot_marker(ch));
    (Some(&text[word_start..word_end]), dotted)
}

/// Tracks quotes and brackets opened since the current sentence started.
/// Straight single quotes are ignored: they are indistinguishable from
/// apostrophes without deeper analysis, and a false "open" would suppress
/// every following boundary.
#[derive(Debug, Clone, Default)]
struct EnclosureStack {
    expected: Vec<char>,
}

impl EnclosureStack {
    fn clear(&mut self) {
        self.expected.clear();
    }

    fn observe(&mut self, ch: char) {
        if let Some(close) = classify::matching_bracket(ch) {
            self.expected.push(close);
        } else if classify::is_close_bracket(ch) {
            if self.expected.last() == Some(&ch) {
                self.expected.pop();
            }
        } else {
            match ch {
                '"' => {
                    if self.expected.last() == Some(&'"') {
                        self.expected.pop();
                    } else {
                        self.expected.push('"');
                    }
                }
                '\u{201C}' => self.expected.push('\u{201D}'),
                '\u{00AB}' => self.expected.push('\u{00BB}'),
                '\u{2039}' => self.expected.push('\u{203A}'),
                '\u{201D}' | '\u{00BB}' | '\u{203A}' => {
                    if self.expected.last() == Some(&ch) {
                        self.expected.pop();
                    }
                }
                _ => {}
            }
        }
    }

    /// Whether an enclosure would still be open after also observing the
    /// candidate's trailer characters.
    fn open_after(&self, trailers: impl Iterator<Item = char>) -> bool {
        let mut probe = self.clone();
        for ch in trailers {
            probe.observe(ch);
        }
        !probe.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(sentences: &[Sentence<'a>]) -> Vec<&'a str> {
        sentences.iter().map(|s| s.text).collect()
    }

    fn assert_single_split(expected: &[&str]) {
        let text = expected.join(" ");
        assert_eq!(texts(&split_single(&text)), expected);
    }

    #[test]
    fn simple() {
        assert_single_split(&["This is a test."]);
    }

    #[test]
    fn no_marker_is_one_sentence() {
        assert_eq!(texts(&split_single("Folding Beijing by Hao Jingfang")), [
            "Folding Beijing by Hao Jingfang"
        ]);
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert!(split_single("").is_empty());
        assert!(split_single("   \t  ").is_empty());
        assert!(split_multi("\n\n\n", &SegmentConfig::default()).is_empty());
    }

    #[test]
    fn name_initials() {
        assert_single_split(&[
            "Written by A. McArthur, K. Elvin, and D. Eden.",
            "This is Mr. A. Starr over there.",
            "B. Boyden is over there.",
        ]);
    }

    #[test]
    fn author_list() {
        assert_single_split(&[
            "R. S. Kauffman, R. Ahmed, and B. N. Fields show stuff in their paper.",
        ]);
    }

    #[test]
    fn continuation_words() {
        assert_single_split(&[
            "colonic colonization inhibits development of inflammatory lesions.",
            "to investigate whether an inf. of the pancreas was the case...",
            "though we hate to use capital lett. that usually separate sentences.",
        ]);
    }

    #[test]
    fn species_names() {
        assert_single_split(&[
            "Their presence was detected by transformation into S. lividans.",
            "Three subjects diagnosed as having something.",
        ]);
    }

    #[test]
    fn species_names_tough() {
        assert_single_split(&[
            "The level of the genus Allomonas gen. nov. with so far the only species A. enterica known.",
        ]);
    }

    #[test]
    fn european_dates() {
        assert_single_split(&["Der Unfall am 24. Dezember 2016."]);
        assert_single_split(&["Am 13. Jän. 2006 war es regnerisch."]);
        assert_single_split(&["Am 13. 1. 2006 war es regnerisch."]);
    }

    #[test]
    fn middle_name_initials() {
        assert_single_split(&[
            "The administrative basis for Lester B. Pearson's foreign policy was developed later.",
            "This model was introduced by Dr. Edgar F. Codd after initial criticisms.",
        ]);
    }

    #[test]
    fn nested_parenthesis() {
        assert_single_split(&[
            "Nested ((Parenthesis. (With words right (inside))) (More stuff. Uff, this is it!))",
            "In the Big City.",
        ]);
    }

    #[test]
    fn bracketed_citation() {
        assert_single_split(&[
            "Bla bla [Sim et al. (1981) Biochem. J. 193, 129-141].",
            "The adjusted (ml. min-1. 1.73 m-2) rate.",
        ]);
    }

    #[test]
    fn unclosed_bracket_does_not_block_forever() {
        assert_single_split(&[
            "The medial preoptic area (MPOA), and 2) did not decrease Fos-lir.",
            "However, olfactory desensitizations did decrease Fos-lir.",
        ]);
    }

    #[test]
    fn quoted_speech_with_lowercase_continuation() {
        assert_single_split(&["\"Hello!\" said the man.", "Then he left."]);
    }

    #[test]
    fn single_mode_splits_at_every_newline() {
        let text = "One line without terminal\nSecond line.";
        let expected = ["One line without terminal", "Second line."];
        assert_eq!(texts(&split_single(text)), expected);
    }

    #[test]
    fn single_newline_is_whitespace() {
        let text = "This is a\nmultiline sentence. And this is Mr.\nAbbrevation.";
        let expected = ["This is a\nmultiline sentence.", "And this is Mr.\nAbbrevation."];
        assert_eq!(texts(&split_multi(text, &SegmentConfig::default())), expected);
    }

    #[test]
    fn paragraph_break_always_splits() {
        let text = "One half\n\nof a broken sentence.";
        let expected = ["One half", "of a broken sentence."];
        assert_eq!(texts(&split_multi(text, &SegmentConfig::default())), expected);
    }

    #[test]
    fn rejected_candidate_at_paragraph_end_still_flushes() {
        let text = "He saw Mr.\n\nSmith arrived.";
        let expected = ["He saw Mr.", "Smith arrived."];
        assert_eq!(texts(&split_multi(text, &SegmentConfig::default())), expected);
    }

    #[test]
    fn spans_round_trip() {
        let text = "  Hello, Mr. Man. He smiled!!  This, i.e. that, is it. ";
        let sentences = split_single(text);
        let mut rebuilt = String::new();
        let mut cursor = 0;
        for sentence in &sentences {
            rebuilt.push_str(&text[cursor..sentence.span.start]);
            rebuilt.push_str(sentence.span.slice(text));
            assert_eq!(sentence.span.slice(text), sentence.text);
            cursor = sentence.span.end;
        }
        rebuilt.push_str(&text[cursor..]);
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn confirmed_boundaries_are_candidates() {
        // every non-final sentence must end in a terminal marker plus
        // optional trailers, i.e. a structural candidate
        let text = "One sentence here. \"Another one!\" Third, i.e. last, one. Trailing bit";
        for sentence in split_single(text).iter().rev().skip(1) {
            let mut chars = sentence.text.chars().rev().peekable();
            while let Some(&ch) = chars.peek() {
                if classify::is_close_quote(ch) || classify::is_close_bracket(ch) {
                    chars.next();
                } else {
                    break;
                }
            }
            let last = chars.next().expect("non-empty sentence");
            assert!(
                classify::is_terminal_marker(last),
                "sentence {:?} does not end at a candidate boundary",
                sentence.text
            );
        }
    }

    #[test]
    fn custom_lexicon_is_borrowed() {
        let lexicon = Lexicon::new(["Xyz"], [] as [&str; 0], [] as [&str; 0]);
        let segmenter = Segmenter::new(&lexicon);
        let sentences = segmenter.split_single("We met Xyz. Smith today. It was fine.");
        assert_eq!(texts(&sentences), ["We met Xyz. Smith today.", "It was fine."]);
    }

    #[test]
    fn language_selection_changes_behavior() {
        let text = "Wir trafen uns am 3. Okt. 2019 in Wien.";
        let de = split_multi(text, &SegmentConfig { language: Language::De });
        assert_eq!(texts(&de), [text]);
    }
}
