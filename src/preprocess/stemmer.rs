// Porter stemmer (M.F. Porter, 1980).
//
// Suffix stripping in five steps:
// 1. plurals and -ed/-ing
// 2. double suffixes (-ational → -ate, -ization → -ize, ...)
// 3. -icate, -ative, -ful, -ness
// 4. single suffixes (-al, -ance, -ment, ...) when the stem is long enough
// 5. final -e and -ll
//
// Operates on lowercase ASCII. Anything else (and words of two letters or
// fewer) is returned unchanged, so unknown input degrades to a no-op.

/// Step 2 rules. Order matters: a longer suffix is listed before any shorter
/// suffix it ends with.
const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Rule-based English stemmer. Stateless; one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Reduce `word` to its stem.
    pub fn stem(&self, word: &str) -> String {
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }

        let mut w = word.as_bytes().to_vec();
        step1a(&mut w);
        step1b(&mut w);
        step1c(&mut w);
        replace_first(&mut w, STEP2);
        replace_first(&mut w, STEP3);
        step4(&mut w);
        step5(&mut w);

        w.into_iter().map(char::from).collect()
    }
}

/// `y` is a consonant at the start of a word or after a vowel.
fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Porter's m: the number of vowel→consonant transitions in `w`,
/// i.e. the n in [C](VC)^n[V].
fn measure(w: &[u8]) -> usize {
    let n = w.len();
    let mut i = 0;
    while i < n && is_consonant(w, i) {
        i += 1;
    }

    let mut m = 0;
    loop {
        while i < n && !is_consonant(w, i) {
            i += 1;
        }
        if i >= n {
            return m;
        }
        while i < n && is_consonant(w, i) {
            i += 1;
        }
        m += 1;
    }
}

fn has_vowel(w: &[u8]) -> bool {
    (0..w.len()).any(|i| !is_consonant(w, i))
}

fn ends_double_consonant(w: &[u8]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && is_consonant(w, n - 1)
}

/// consonant-vowel-consonant ending, where the last consonant isn't w, x or y.
fn ends_cvc(w: &[u8]) -> bool {
    let n = w.len();
    n >= 3
        && is_consonant(w, n - 1)
        && !is_consonant(w, n - 2)
        && is_consonant(w, n - 3)
        && !matches!(w[n - 1], b'w' | b'x' | b'y')
}

fn ends(w: &[u8], suffix: &str) -> bool {
    w.ends_with(suffix.as_bytes())
}

fn set_suffix(w: &mut Vec<u8>, old_len: usize, new: &str) {
    w.truncate(w.len() - old_len);
    w.extend_from_slice(new.as_bytes());
}

fn step1a(w: &mut Vec<u8>) {
    if ends(w, "sses") {
        set_suffix(w, 4, "ss");
    } else if ends(w, "ies") {
        set_suffix(w, 3, "i");
    } else if ends(w, "ss") {
        // unchanged
    } else if ends(w, "s") {
        w.pop();
    }
}

fn step1b(w: &mut Vec<u8>) {
    if ends(w, "eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.pop();
        }
        return;
    }

    let suffix_len = if ends(w, "ed") {
        2
    } else if ends(w, "ing") {
        3
    } else {
        return;
    };
    if !has_vowel(&w[..w.len() - suffix_len]) {
        return;
    }
    w.truncate(w.len() - suffix_len);

    if ends(w, "at") || ends(w, "bl") || ends(w, "iz") {
        w.push(b'e');
    } else if ends_double_consonant(w) && !matches!(w.last(), Some(b'l' | b's' | b'z')) {
        w.pop();
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push(b'e');
    }
}

fn step1c(w: &mut [u8]) {
    let n = w.len();
    if ends(w, "y") && has_vowel(&w[..n - 1]) {
        w[n - 1] = b'i';
    }
}

/// Apply the first rule whose suffix matches, if the remaining stem has m > 0.
/// Only the first matching suffix is considered.
fn replace_first(w: &mut Vec<u8>, rules: &[(&str, &str)]) {
    if let Some((suffix, replacement)) = rules.iter().find(|(suffix, _)| ends(w, suffix)) {
        if measure(&w[..w.len() - suffix.len()]) > 0 {
            set_suffix(w, suffix.len(), replacement);
        }
    }
}

fn step4(w: &mut Vec<u8>) {
    for suffix in STEP4 {
        if !ends(w, suffix) {
            continue;
        }
        let stem_len = w.len() - suffix.len();
        if *suffix == "ion" && !matches!(w[..stem_len].last(), Some(b's' | b't')) {
            continue;
        }
        if measure(&w[..stem_len]) > 1 {
            w.truncate(stem_len);
        }
        return;
    }
}

fn step5(w: &mut Vec<u8>) {
    if ends(w, "e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            w.pop();
        }
    }
    if ends(w, "ll") && measure(w) > 1 {
        w.pop();
    }
}
