// The trained toxic comment classifier.
//
// Loads the two JSON artifacts once and holds them immutably for the life of
// the process. Prediction is preprocess → TF-IDF → one logistic regression
// per label. There is no degraded mode: if either artifact is missing or
// unreadable, construction fails.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::labels::{ToxicityLabel, ToxicityScores};
use super::traits::ToxicityScorer;
use crate::model::artifacts;
use crate::model::vectorizer::TfIdfVectorizer;
use crate::model::MultiOutputClassifier;
use crate::preprocess::Preprocessor;

pub struct ToxicCommentClassifier {
    preprocessor: Preprocessor,
    vectorizer: TfIdfVectorizer,
    model: MultiOutputClassifier,
}

impl ToxicCommentClassifier {
    /// Load the artifacts from `model_dir` with the default English lexicon.
    pub fn load(model_dir: &Path) -> Result<Self> {
        Self::load_with(model_dir, Preprocessor::default())
    }

    /// Load the artifacts from `model_dir` with a caller-supplied preprocessor.
    /// It must match the one the model was trained with.
    pub fn load_with(model_dir: &Path, preprocessor: Preprocessor) -> Result<Self> {
        Self::try_load(model_dir, preprocessor).context("Failed to initialize classifier")
    }

    fn try_load(model_dir: &Path, preprocessor: Preprocessor) -> Result<Self> {
        if !model_dir.is_dir() {
            anyhow::bail!(
                "Model directory not found: {}\nRun `toxfilter train` to create the model files.",
                model_dir.display()
            );
        }
        let vectorizer = artifacts::load_vectorizer(model_dir)?;
        let model = artifacts::load_model(model_dir)?;
        let classifier = Self::from_parts(preprocessor, vectorizer, model)?;
        debug!(
            features = classifier.vectorizer.n_features(),
            trained_at = %classifier.model.trained_at,
            "Loaded toxic comment classifier from {}",
            model_dir.display()
        );
        Ok(classifier)
    }

    /// Assemble a classifier from in-memory parts. The model's labels must
    /// be exactly the six toxicity labels, in order.
    pub fn from_parts(
        preprocessor: Preprocessor,
        vectorizer: TfIdfVectorizer,
        model: MultiOutputClassifier,
    ) -> Result<Self> {
        let expected = ToxicityLabel::names();
        if model.labels != expected {
            anyhow::bail!(
                "Model labels {:?} do not match expected labels {:?}",
                model.labels,
                expected
            );
        }
        Ok(Self {
            preprocessor,
            vectorizer,
            model,
        })
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &MultiOutputClassifier {
        &self.model
    }

    fn try_predict(&self, text: &str) -> Result<(ToxicityScores, String)> {
        if self.vectorizer.n_features() != self.model.n_features {
            anyhow::bail!(
                "Vectorizer produces {} features but the model expects {}",
                self.vectorizer.n_features(),
                self.model.n_features
            );
        }
        let processed = self.preprocessor.preprocess(text);
        let features = self.vectorizer.transform(&processed);
        let probabilities = self.model.predict_proba(&features)?;
        let scores = ToxicityScores::from_slice(&probabilities)?;

        debug!(
            max = scores.max(),
            active_features = features.len(),
            text_preview = %crate::output::truncate_chars(text, 50),
            "Scored comment"
        );
        Ok((scores, processed))
    }
}

impl ToxicityScorer for ToxicCommentClassifier {
    fn predict(&self, text: &str) -> Result<ToxicityScores> {
        self.predict_with_processed(text).map(|(scores, _)| scores)
    }

    fn preprocess_text(&self, text: &str) -> String {
        self.preprocessor.preprocess(text)
    }

    fn predict_with_processed(&self, text: &str) -> Result<(ToxicityScores, String)> {
        self.try_predict(text).context("Prediction failed")
    }
}
