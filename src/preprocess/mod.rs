// Text preprocessing: the deterministic normalization every comment goes
// through before vectorization, at training time and at prediction time.
//
// The pipeline is a fixed sequence of substitutions and lookups. The only
// configuration is the Lexicon (stopwords + slang), held by value so two
// preprocessors with different word lists never interfere.

pub mod contractions;
pub mod emoji;
pub mod lexicon;
pub mod stemmer;

use std::fmt::Display;
use std::sync::LazyLock;

use regex_lite::Regex;

pub use lexicon::Lexicon;
pub use stemmer::PorterStemmer;

static EXCESSIVE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!?]{2,}").expect("punctuation pattern is valid"));

/// Deterministic comment normalizer.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    lexicon: Lexicon,
    stemmer: PorterStemmer,
}

impl Preprocessor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            stemmer: PorterStemmer::new(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run the full pipeline: normalize, drop stopwords, stem.
    ///
    /// Accepts anything with a string representation. Never fails; the
    /// result is empty when every token is a stopword.
    pub fn preprocess<T: Display + ?Sized>(&self, text: &T) -> String {
        let normalized = self.normalize(text);
        normalized
            .split_whitespace()
            .filter(|token| !self.lexicon.is_stopword(token))
            .map(|token| self.stemmer.stem(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The pipeline up to (but not including) stopword removal and stemming:
    /// lowercase, contractions, emoji, slang, letters-only, elongation
    /// collapse, excessive punctuation.
    pub fn normalize<T: Display + ?Sized>(&self, text: &T) -> String {
        let text = text.to_string().to_lowercase();
        let text = contractions::expand(&text);
        let text = emoji::strip_emoji(&text);

        let text = text
            .split_whitespace()
            .map(|token| self.lexicon.expand_slang(token))
            .collect::<Vec<_>>()
            .join(" ");

        let text: String = text
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();

        let text = collapse_repeats(&text);
        EXCESSIVE_PUNCTUATION.replace_all(&text, "").into_owned()
    }
}

/// Collapse every run of three or more identical characters to a single
/// character ("nooooo" → "no"). Runs of two are left alone. Newlines are
/// never collapsed.
pub fn collapse_repeats(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        let keep = if run >= 3 && c != '\n' { 1 } else { run };
        for _ in 0..keep {
            out.push(c);
        }
        i += run;
    }
    out
}
