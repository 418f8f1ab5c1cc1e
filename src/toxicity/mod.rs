// Toxicity classification: labels, scores, the scorer trait and the
// trained classifier behind it.
//
// The shells (CLI, web) only talk to `ToxicityScorer` and `analyze`, so a
// stub scorer can stand in for the trained model in tests.

pub mod classifier;
pub mod examples;
pub mod labels;
pub mod traits;
pub mod verdict;

pub use classifier::ToxicCommentClassifier;
pub use labels::{ToxicityLabel, ToxicityScores};
pub use traits::ToxicityScorer;
pub use verdict::{analyze, Analysis, Interpretation, Verdict};
