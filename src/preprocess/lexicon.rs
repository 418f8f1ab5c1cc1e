// Lexicon: the fixed word lists the preprocessor consults.
//
// The stopword set and the slang dictionary are built once and never
// mutated. Each Preprocessor owns its own Lexicon; there is no process-wide
// word list, so tests can swap in a small deterministic one.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};

/// Gaming and chat slang expanded to plain phrases before feature extraction.
///
/// Lookups are per whitespace token, so the multi-word "git gud" key never
/// matches anything. It stays in the table to keep the dictionary identical
/// to the one the shipped models were trained with.
pub const GAMING_SLANG: [(&str, &str); 10] = [
    ("kys", "kill yourself"),
    ("stfu", "shut the fuck up"),
    ("gg", "good game"),
    ("glhf", "good luck have fun"),
    ("noob", "new player"),
    ("rekt", "wrecked"),
    ("pwned", "dominated"),
    ("l2p", "learn to play"),
    ("git gud", "get good"),
    ("afk", "away from keyboard"),
];

/// Read-only stopword set and slang dictionary.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    slang: HashMap<String, String>,
}

impl Lexicon {
    /// Build a lexicon from explicit word lists.
    pub fn new<S, K, V>(stopwords: S, slang: impl IntoIterator<Item = (K, V)>) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
            slang: slang
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The default English lexicon: NLTK's English stopwords (the
    /// `stop-words` crate built with its `nltk` feature) plus the gaming
    /// slang table.
    pub fn english() -> Self {
        let stopwords: Vec<String> = get(LANGUAGE::English);
        Self::new(stopwords, GAMING_SLANG)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Return the slang expansion for `token`, or the token itself.
    pub fn expand_slang<'a>(&'a self, token: &'a str) -> &'a str {
        self.slang.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn slang_count(&self) -> usize {
        self.slang.len()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}
