// Contraction expansion: "don't" → "do not", "you're" → "you are".
//
// Runs on lowercased text. Words that are irregular ("won't", "can't",
// pronoun + 's) are looked up whole; everything else is peeled suffix by
// suffix from the right, so "wouldn't've" becomes "would not have".
// Possessives ("john's") have no rule and pass through untouched.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

/// Whole-word expansions that the suffix rules can't derive.
const IRREGULAR: &[(&str, &str)] = &[
    ("ain't", "are not"),
    ("can't", "cannot"),
    ("won't", "will not"),
    ("shan't", "shall not"),
    ("let's", "let us"),
    ("y'all", "you all"),
    ("ma'am", "madam"),
    ("o'clock", "of the clock"),
    ("it's", "it is"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("that's", "that is"),
    ("what's", "what is"),
    ("there's", "there is"),
    ("here's", "here is"),
    ("who's", "who is"),
    ("where's", "where is"),
    ("when's", "when is"),
    ("why's", "why is"),
    ("how's", "how is"),
];

/// Apostrophe suffixes, tried in order against the end of the word.
const SUFFIXES: &[(&str, &str)] = &[
    ("n't", " not"),
    ("'re", " are"),
    ("'ve", " have"),
    ("'ll", " will"),
    ("'d", " would"),
    ("'m", " am"),
];

/// Informal spellings without an apostrophe.
const INFORMAL: &[(&str, &str)] = &[
    ("gonna", "going to"),
    ("wanna", "want to"),
    ("gotta", "got to"),
    ("gimme", "give me"),
    ("lemme", "let me"),
    ("kinda", "kind of"),
    ("sorta", "sort of"),
    ("outta", "out of"),
    ("dunno", "do not know"),
];

static APOSTROPHE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z]+(?:['’][a-z]+)+").expect("apostrophe word pattern is valid")
});

static INFORMAL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    let alternation: Vec<&str> = INFORMAL.iter().map(|(word, _)| *word).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternation.join("|")))
        .expect("informal word pattern is valid")
});

/// Expand every contraction in `text`. Text without contractions is returned
/// unchanged.
pub fn expand(text: &str) -> String {
    let expanded = APOSTROPHE_WORD.replace_all(text, |caps: &Captures| {
        let word = &caps[0];
        expand_word(word).unwrap_or_else(|| word.to_string())
    });

    INFORMAL_WORD
        .replace_all(&expanded, |caps: &Captures| {
            let word = &caps[0];
            INFORMAL
                .iter()
                .find(|(informal, _)| *informal == word)
                .map(|(_, full)| full.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .into_owned()
}

/// Expand one apostrophe word, or `None` if no rule applies.
fn expand_word(word: &str) -> Option<String> {
    // Curly apostrophes are common in pasted text
    let original = word.replace('’', "'");
    let mut head = original.clone();
    let mut tail: Vec<&str> = Vec::new();

    loop {
        if let Some((_, full)) = IRREGULAR.iter().find(|(short, _)| *short == head) {
            head = full.to_string();
            break;
        }
        if !head.contains('\'') {
            break;
        }
        match SUFFIXES.iter().find(|(suffix, _)| head.ends_with(suffix)) {
            Some((suffix, full)) => {
                head.truncate(head.len() - suffix.len());
                tail.push(*full);
            }
            None => break,
        }
    }

    if tail.is_empty() && head == original {
        return None;
    }

    // Suffixes were peeled right-to-left, so they're re-attached in reverse
    for full in tail.iter().rev() {
        head.push_str(full);
    }
    Some(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_negations() {
        assert_eq!(expand("don't"), "do not");
        assert_eq!(expand("isn't it"), "is not it");
        assert_eq!(expand("i can't"), "i cannot");
        assert_eq!(expand("won't stop"), "will not stop");
    }

    #[test]
    fn test_pronoun_contractions() {
        assert_eq!(expand("you're a noob"), "you are a noob");
        assert_eq!(expand("i'm here"), "i am here");
        assert_eq!(expand("it's fine"), "it is fine");
        assert_eq!(expand("we'll see"), "we will see");
        assert_eq!(expand("they've gone"), "they have gone");
        assert_eq!(expand("she'd know"), "she would know");
    }

    #[test]
    fn test_stacked_contractions() {
        assert_eq!(expand("wouldn't've"), "would not have");
    }

    #[test]
    fn test_curly_apostrophe() {
        assert_eq!(expand("don’t"), "do not");
    }

    #[test]
    fn test_possessive_untouched() {
        assert_eq!(expand("john's car"), "john's car");
        assert_eq!(expand("rock'n'roll"), "rock'n'roll");
    }

    #[test]
    fn test_informal_words() {
        assert_eq!(expand("i'm gonna win"), "i am going to win");
        assert_eq!(expand("dunno"), "do not know");
        // Only whole words
        assert_eq!(expand("gonnabe"), "gonnabe");
    }

    #[test]
    fn test_punctuation_adjacent() {
        assert_eq!(expand("don't!"), "do not!");
    }

    #[test]
    fn test_no_contractions() {
        assert_eq!(expand("plain text here"), "plain text here");
        assert_eq!(expand(""), "");
    }
}
