// Toxicity scorer trait: the seam between the shells (CLI, web) and the
// trained classifier.
//
// Prediction is CPU-bound and synchronous. Async callers run it on the
// blocking pool.

use anyhow::Result;

use super::labels::ToxicityScores;

/// Anything that can score a comment for toxicity.
pub trait ToxicityScorer: Send + Sync {
    /// Score a single comment.
    fn predict(&self, text: &str) -> Result<ToxicityScores>;

    /// The normalized form the scorer actually sees. Scorers without a
    /// preprocessing stage return the text unchanged.
    fn preprocess_text(&self, text: &str) -> String {
        text.to_string()
    }

    /// Score a comment and return the normalized text alongside. Scorers
    /// with a preprocessing stage override this to run it once.
    fn predict_with_processed(&self, text: &str) -> Result<(ToxicityScores, String)> {
        Ok((self.predict(text)?, self.preprocess_text(text)))
    }
}
