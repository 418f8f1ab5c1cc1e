// TF-IDF vectorizer.
//
// Fitting picks the `max_features` most frequent terms in the corpus and
// computes a smoothed IDF for each. Transforming counts vocabulary terms in
// a text, weights them by IDF and L2-normalizes the result. Terms outside
// the vocabulary contribute nothing.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Vocabulary cap used when training the shipped models.
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

/// Tokens are runs of two or more word characters.
static TOKEN: LazyLock<regex_lite::Regex> =
    LazyLock::new(|| regex_lite::Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Sparse feature vector: (feature index, weight) pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// A fitted TF-IDF vectorizer. Immutable after `fit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Cap the vocabulary was fitted with
    max_features: usize,
    /// term → feature index (indices assigned in alphabetical term order)
    vocabulary: HashMap<String, usize>,
    /// IDF weight per feature index
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Fit the vocabulary and IDF weights on a corpus.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Result<Self> {
        if documents.is_empty() {
            anyhow::bail!("Cannot fit a vectorizer on an empty corpus");
        }
        if max_features == 0 {
            anyhow::bail!("max_features must be at least 1");
        }

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in tokens {
                *term_counts.entry(term).or_insert(0) += 1;
            }
        }

        if term_counts.is_empty() {
            anyhow::bail!(
                "Empty vocabulary: none of the {} documents contain a token",
                documents.len()
            );
        }

        // Most frequent terms first, ties alphabetical, so the cut is deterministic
        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        info!(
            documents = documents.len(),
            features = vocabulary.len(),
            max_features,
            "Fitted TF-IDF vocabulary"
        );

        Ok(Self {
            max_features,
            vocabulary,
            idf,
        })
    }

    /// Map a text to its L2-normalized TF-IDF vector. Empty when no token is
    /// in the vocabulary.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();
        vector.sort_by_key(|&(index, _)| index);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    /// Dimensionality of the feature space.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Vocabulary cap the vectorizer was fitted with.
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.feature_index(term).map(|index| self.idf[index])
    }

    /// Check the internal consistency of a deserialized vectorizer.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            anyhow::bail!(
                "Vectorizer vocabulary has {} terms but {} IDF weights",
                self.vocabulary.len(),
                self.idf.len()
            );
        }
        if self.vocabulary.len() > self.max_features {
            anyhow::bail!(
                "Vectorizer has {} terms but was fitted with max_features = {}",
                self.vocabulary.len(),
                self.max_features
            );
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &index) in &self.vocabulary {
            if index >= seen.len() || seen[index] {
                anyhow::bail!("Vectorizer term {term:?} has invalid feature index {index}");
            }
            seen[index] = true;
        }
        if let Some(bad) = self.idf.iter().find(|w| !w.is_finite()) {
            anyhow::bail!("Vectorizer contains a non-finite IDF weight: {bad}");
        }
        Ok(())
    }
}

/// Lowercase and split into 2+ character word tokens.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}
