//! Per-language abbreviation and heuristic word lists.
//!
//! The lists are immutable lookup tables injected into the segmenter as
//! configuration. Entries are case-sensitive and abbreviations are stored
//! without their trailing dot (`"Mr"`, `"i.e"`, `"z.B"`), because the dot is
//! the candidate marker being judged.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::OnceLock;

/// Selects which abbreviation/continuation lists the segmenter consults.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Language {
    En,
    De,
    Es,
    /// Union of all language lists; the conservative default.
    #[default]
    Generic,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            "es" => Ok(Language::Es),
            "generic" => Ok(Language::Generic),
            other => Err(format!("unknown language '{other}' (expected en, de, es, or generic)")),
        }
    }
}

// Abbreviations that should never end a sentence, so a following dot is not a
// boundary. Month abbreviations are included because they occur dot-marked in
// European dates ("13. Jän. 2006").
const EN_ABBREVIATIONS: &[&str] = &[
    "approx", "Approx", "al", "Capt", "cf", "Cf", "Col", "Dr", "e.g", "E.g", "et", "fig", "Fig",
    "figs", "Figs", "Gen", "i.e", "I.e", "i.v", "I.v", "Lt", "Maj", "Mr", "Mrs", "Ms", "Mt",
    "nat", "Nat", "No", "nr", "Nr", "Prof", "Rev", "Sgt", "Sr", "St", "univ", "Univ", "vol",
    "Vol", "vs", "Vs", "E.U", "U.K", "U.S", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul",
    "Aug", "Sep", "Sept", "Oct", "Nov", "Dec",
];

const DE_ABBREVIATIONS: &[&str] = &[
    "bzw", "Bzw", "ca", "Ca", "d.h", "D.h", "Dr", "evtl", "Evtl", "f.e", "F.e", "ggf", "Ggf",
    "Mag", "med", "Med", "Nr", "nr", "phil", "Phil", "Prof", "rer", "Rer", "u.a", "U.a", "usw",
    "vgl", "Vgl", "z.B", "Z.B", "z.T", "Z.T", "Jän", "Jan", "Feb", "Mär", "Apr", "Mai", "Jun",
    "Jul", "Aug", "Sep", "Sept", "Okt", "Nov", "Dez",
];

const ES_ABBREVIATIONS: &[&str] = &[
    "aprox", "Aprox", "Dr", "Dra", "p.e", "P.e", "Prof", "Sr", "Sra", "Srta", "Ud", "Uds",
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

// Lower-case words that in the given form rarely start a sentence. Derived
// from corpus statistics over edited prose; biased towards under-splitting.
const EN_CONTINUATIONS: &[&str] = &[
    "and", "are", "between", "by", "from", "has", "into", "is", "of", "or", "than", "that",
    "through", "via", "was", "were", "whether", "with",
];

const DE_CONTINUATIONS: &[&str] = &[
    "aber", "als", "auch", "bei", "bis", "dass", "durch", "für", "ist", "mit", "nach", "oder",
    "sind", "sowie", "und", "von", "war", "waren", "wie", "zu",
];

const ES_CONTINUATIONS: &[&str] = &[
    "como", "con", "de", "del", "en", "entre", "era", "eran", "es", "fue", "fueron", "ni", "o",
    "para", "pero", "por", "que", "sin", "sobre", "son", "y",
];

// Month-name prefixes for the European date rule ("24. Dezember 2016"). Match
// is by prefix, so "Dez" covers "Dez.", "Dezember", and "Dezbr".
const EN_MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DE_MONTHS: &[&str] = &[
    "Jän", "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];

const ES_MONTHS: &[&str] = &[
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Immutable abbreviation/heuristic dictionary for one language (or the
/// generic union). Owned by the caller and only borrowed by the segmenter, so
/// one instance may serve any number of concurrent segmentation runs.
#[derive(Debug, Clone)]
pub struct Lexicon {
    abbreviations: HashSet<String>,
    continuations: HashSet<String>,
    months: Vec<String>,
}

fn chained(lists: [&'static [&'static str]; 3]) -> impl Iterator<Item = &'static str> {
    lists.into_iter().flatten().copied()
}

impl Lexicon {
    pub fn new<A, C, M>(abbreviations: A, continuations: C, months: M) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Lexicon {
            abbreviations: abbreviations.into_iter().map(Into::into).collect(),
            continuations: continuations.into_iter().map(Into::into).collect(),
            months: months.into_iter().map(Into::into).collect(),
        }
    }

    /// The shared, lazily built dictionary for `language`.
    pub fn for_language(language: Language) -> &'static Lexicon {
        static EN: OnceLock<Lexicon> = OnceLock::new();
        static DE: OnceLock<Lexicon> = OnceLock::new();
        static ES: OnceLock<Lexicon> = OnceLock::new();
        static GENERIC: OnceLock<Lexicon> = OnceLock::new();

        match language {
            Language::En => EN.get_or_init(|| {
                Lexicon::new(
                    EN_ABBREVIATIONS.iter().copied(),
                    EN_CONTINUATIONS.iter().copied(),
                    EN_MONTHS.iter().copied(),
                )
            }),
            Language::De => DE.get_or_init(|| {
                Lexicon::new(
                    DE_ABBREVIATIONS.iter().copied(),
                    DE_CONTINUATIONS.iter().copied(),
                    DE_MONTHS.iter().copied(),
                )
            }),
            Language::Es => ES.get_or_init(|| {
                Lexicon::new(
                    ES_ABBREVIATIONS.iter().copied(),
                    ES_CONTINUATIONS.iter().copied(),
                    ES_MONTHS.iter().copied(),
                )
            }),
            Language::Generic => GENERIC.get_or_init(|| {
                Lexicon::new(
                    chained([EN_ABBREVIATIONS, DE_ABBREVIATIONS, ES_ABBREVIATIONS]),
                    chained([EN_CONTINUATIONS, DE_CONTINUATIONS, ES_CONTINUATIONS]),
                    chained([EN_MONTHS, DE_MONTHS, ES_MONTHS]),
                )
            }),
        }
    }

    /// Case-sensitive lookup of the word preceding a dot marker, without the
    /// dot itself ("Mr", "i.e").
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    /// Case-sensitive lookup of a lower-case word that rarely starts a
    /// sentence.
    pub fn is_continuation(&self, word: &str) -> bool {
        self.continuations.contains(word)
    }

    /// Whether `word` starts with a known month-name prefix.
    pub fn is_month(&self, word: &str) -> bool {
        self.months.iter().any(|m| word.starts_with(m.as_str()))
    }
}
