// Verdict and interpretation for a set of scores.
//
// Both are driven by the maximum score across labels, with strict
// comparisons: exactly 0.5 is clean, exactly 0.8 is only "signs of toxicity".

use anyhow::Result;
use serde::{Serialize, Serializer};

use super::labels::ToxicityScores;
use super::traits::ToxicityScorer;

pub const TOXIC_THRESHOLD: f64 = 0.5;
pub const HIGH_TOXICITY_THRESHOLD: f64 = 0.8;

/// Binary call on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Toxic,
    Clean,
}

impl Verdict {
    pub fn from_max(max_score: f64) -> Self {
        if max_score > TOXIC_THRESHOLD {
            Verdict::Toxic
        } else {
            Verdict::Clean
        }
    }

    pub fn is_toxic(self) -> bool {
        self == Verdict::Toxic
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Toxic => "Toxic content detected!",
            Verdict::Clean => "No toxic content detected",
        }
    }
}

/// Three-tier reading of the maximum score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    HighlyToxic,
    SignsOfToxicity,
    Clean,
}

impl Interpretation {
    pub fn from_max(max_score: f64) -> Self {
        if max_score > HIGH_TOXICITY_THRESHOLD {
            Interpretation::HighlyToxic
        } else if max_score > TOXIC_THRESHOLD {
            Interpretation::SignsOfToxicity
        } else {
            Interpretation::Clean
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Interpretation::HighlyToxic => {
                "This content appears highly toxic and potentially harmful."
            }
            Interpretation::SignsOfToxicity => "This content shows signs of toxicity.",
            Interpretation::Clean => "This content appears clean with low toxicity signals.",
        }
    }
}

impl Serialize for Interpretation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Everything the shells show for one comment.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub scores: ToxicityScores,
    pub max_score: f64,
    pub verdict: Verdict,
    pub interpretation: Interpretation,
    pub processed_text: String,
}

impl Analysis {
    pub fn from_scores(scores: ToxicityScores, processed_text: String) -> Self {
        let max_score = scores.max();
        Self {
            scores,
            max_score,
            verdict: Verdict::from_max(max_score),
            interpretation: Interpretation::from_max(max_score),
            processed_text,
        }
    }
}

/// Score a comment and derive its verdict and interpretation.
pub fn analyze(scorer: &dyn ToxicityScorer, text: &str) -> Result<Analysis> {
    let (scores, processed_text) = scorer.predict_with_processed(text)?;
    Ok(Analysis::from_scores(scores, processed_text))
}
