// Trained model artifacts: the TF-IDF vectorizer and the multi-output
// logistic regression, plus the JSON files they're stored in.
//
// Both artifacts are produced once by `toxfilter train` and only ever read
// afterwards. Nothing here knows about toxicity labels specifically; the
// classifier checks the recorded label names against its own enumeration.

pub mod artifacts;
pub mod logistic;
pub mod vectorizer;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use logistic::LogisticRegression;
use vectorizer::SparseVector;

/// One independent binary classifier per label, in a fixed label order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiOutputClassifier {
    /// Label names, index-aligned with `estimators`
    pub labels: Vec<String>,
    /// Feature dimensionality every estimator expects
    pub n_features: usize,
    pub trained_at: DateTime<Utc>,
    estimators: Vec<LogisticRegression>,
}

impl MultiOutputClassifier {
    /// Assemble a classifier from already-fitted estimators.
    pub fn new(labels: Vec<String>, estimators: Vec<LogisticRegression>) -> Result<Self> {
        if labels.len() != estimators.len() {
            anyhow::bail!(
                "{} labels but {} estimators",
                labels.len(),
                estimators.len()
            );
        }
        let n_features = estimators.first().map(|e| e.n_features()).unwrap_or(0);
        let model = Self {
            labels,
            n_features,
            trained_at: Utc::now(),
            estimators,
        };
        model.validate()?;
        Ok(model)
    }

    /// Positive-class probability for every label, in label order.
    pub fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>> {
        self.estimators
            .iter()
            .map(|estimator| estimator.predict_proba(x))
            .collect()
    }

    pub fn estimators(&self) -> &[LogisticRegression] {
        &self.estimators
    }

    /// Check the internal consistency of a deserialized model.
    pub fn validate(&self) -> Result<()> {
        if self.labels.len() != self.estimators.len() {
            anyhow::bail!(
                "Model lists {} labels but holds {} estimators",
                self.labels.len(),
                self.estimators.len()
            );
        }
        for (label, estimator) in self.labels.iter().zip(&self.estimators) {
            if estimator.n_features() != self.n_features {
                anyhow::bail!(
                    "Estimator for {label:?} has {} features, expected {}",
                    estimator.n_features(),
                    self.n_features
                );
            }
            let finite = estimator.intercept.is_finite()
                && estimator.coefficients.iter().all(|w| w.is_finite());
            if !finite {
                anyhow::bail!("Estimator for {label:?} contains non-finite weights");
            }
        }
        Ok(())
    }
}
