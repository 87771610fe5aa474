//! Rule-based sentence segmentation and word tokenization for Indo-European
//! languages.
//!
//! Segmentation finds candidate boundaries at terminal punctuation and then
//! rejects the ones inside abbreviations, dates, initials, species names,
//! and unbalanced enclosures. Tokenization splits at every alphanumeric
//! boundary and merges word-internal punctuation, broken hyphenations, and
//! (optionally) URLs and e-mail addresses back together. Both stages report
//! byte spans into the input, so the original text can always be recovered.
//!
//! ```
//! use orthotok::{split_single, tokenizer::word_tokenizer};
//!
//! let sentences = split_single("This is it, i.e. the end. Good-bye!");
//! assert_eq!(sentences.len(), 2);
//!
//! let words: Vec<_> =
//!     word_tokenizer(sentences[0].text).iter().map(|t| t.text().to_owned()).collect();
//! assert_eq!(words[4], "i.e.");
//! ```

pub mod classify;
pub mod lexicon;
pub mod segmenter;
pub mod span;
pub mod tokenizer;

// Re-export the segmentation entry points for convenient access
pub use segmenter::{split_multi, split_single, SegmentConfig, Segmenter, Sentence};

pub use lexicon::{Language, Lexicon};
pub use span::Span;
pub use tokenizer::{Token, TokenKind};
