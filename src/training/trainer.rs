// Offline training: dataset → vectorizer + one logistic regression per label.
//
// `fit` trains on every row it's given. `train` does the full job: seeded
// 80/20 split, fit on the training side, evaluate on the held-out side.
// Text goes through the same Preprocessor used at prediction time.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use super::dataset::Dataset;
use super::split::{train_test_split, DEFAULT_SEED};
use crate::model::logistic::{log_loss, FitSummary, LogisticParams, LogisticRegression};
use crate::model::vectorizer::{SparseVector, TfIdfVectorizer, DEFAULT_MAX_FEATURES};
use crate::model::{artifacts, MultiOutputClassifier};
use crate::preprocess::Preprocessor;
use crate::toxicity::{ToxicCommentClassifier, ToxicityLabel};

/// Held-out share of the dataset.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct TrainingOptions {
    pub max_features: usize,
    pub params: LogisticParams,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            params: LogisticParams::default(),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

/// A freshly fitted vectorizer and model, plus how each label's fit ended.
pub struct FittedModel {
    pub vectorizer: TfIdfVectorizer,
    pub model: MultiOutputClassifier,
    pub summaries: Vec<FitSummary>,
}

impl FittedModel {
    pub fn save(&self, dir: &std::path::Path) -> Result<()> {
        artifacts::save(dir, &self.vectorizer, &self.model)
    }

    pub fn into_classifier(self, preprocessor: Preprocessor) -> Result<ToxicCommentClassifier> {
        ToxicCommentClassifier::from_parts(preprocessor, self.vectorizer, self.model)
    }
}

/// Held-out metrics for one label.
#[derive(Debug, Clone, Serialize)]
pub struct LabelReport {
    pub label: &'static str,
    pub train_positives: usize,
    pub test_positives: usize,
    pub accuracy: f64,
    pub log_loss: f64,
    pub iterations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub train_size: usize,
    pub test_size: usize,
    pub n_features: usize,
    pub labels: Vec<LabelReport>,
}

/// Fit the vectorizer and every label's estimator on all of `dataset`.
pub fn fit(
    dataset: &Dataset,
    preprocessor: &Preprocessor,
    options: &TrainingOptions,
) -> Result<FittedModel> {
    let processed = preprocess_all(dataset, preprocessor, "Preprocess")?;
    let vectorizer = TfIdfVectorizer::fit(&processed, options.max_features)?;
    let features: Vec<SparseVector> = processed.iter().map(|t| vectorizer.transform(t)).collect();

    let pb = progress_bar(ToxicityLabel::COUNT, "  Labels     ")?;
    let mut estimators = Vec::with_capacity(ToxicityLabel::COUNT);
    let mut summaries = Vec::with_capacity(ToxicityLabel::COUNT);
    for label in ToxicityLabel::ALL {
        pb.set_message(label.as_str());
        let targets = dataset.column(label);
        let (estimator, summary) = LogisticRegression::fit(
            &features,
            &targets,
            vectorizer.n_features(),
            &options.params,
        )
        .with_context(|| format!("Failed to fit estimator for label {label}"))?;
        if !summary.converged {
            warn!(
                label = label.as_str(),
                iterations = summary.iterations,
                "Estimator did not converge; consider raising --max-iter"
            );
        }
        estimators.push(estimator);
        summaries.push(summary);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let model = MultiOutputClassifier::new(ToxicityLabel::names(), estimators)?;
    Ok(FittedModel {
        vectorizer,
        model,
        summaries,
    })
}

/// Split, fit on the training side and evaluate on the held-out side.
pub fn train(
    dataset: &Dataset,
    preprocessor: &Preprocessor,
    options: &TrainingOptions,
) -> Result<(FittedModel, TrainingReport)> {
    let split = train_test_split(dataset.len(), options.test_fraction, options.seed)?;
    let train_set = dataset.subset(&split.train);
    let test_set = dataset.subset(&split.test);
    info!(
        train = train_set.len(),
        test = test_set.len(),
        seed = options.seed,
        "Split dataset"
    );

    let fitted = fit(&train_set, preprocessor, options)?;
    let report = evaluate(&fitted, &train_set, &test_set, preprocessor)?;
    Ok((fitted, report))
}

/// Per-label accuracy (at the 0.5 threshold) and log loss on `test_set`.
fn evaluate(
    fitted: &FittedModel,
    train_set: &Dataset,
    test_set: &Dataset,
    preprocessor: &Preprocessor,
) -> Result<TrainingReport> {
    let processed = preprocess_all(test_set, preprocessor, "Evaluate  ")?;
    let probabilities: Vec<Vec<f64>> = processed
        .iter()
        .map(|text| fitted.model.predict_proba(&fitted.vectorizer.transform(text)))
        .collect::<Result<_>>()?;

    let train_positives = train_set.positives();
    let test_positives = test_set.positives();

    let labels = ToxicityLabel::ALL
        .iter()
        .zip(&fitted.summaries)
        .map(|(&label, summary)| {
            let targets = test_set.column(label);
            let probs: Vec<f64> = probabilities.iter().map(|row| row[label.index()]).collect();
            let correct = targets
                .iter()
                .zip(&probs)
                .filter(|&(&target, &p)| (p > 0.5) == target)
                .count();
            LabelReport {
                label: label.as_str(),
                train_positives: train_positives[label.index()],
                test_positives: test_positives[label.index()],
                accuracy: correct as f64 / targets.len() as f64,
                log_loss: log_loss(&targets, &probs),
                iterations: summary.iterations,
                converged: summary.converged,
            }
        })
        .collect();

    Ok(TrainingReport {
        train_size: train_set.len(),
        test_size: test_set.len(),
        n_features: fitted.vectorizer.n_features(),
        labels,
    })
}

fn preprocess_all(
    dataset: &Dataset,
    preprocessor: &Preprocessor,
    stage: &str,
) -> Result<Vec<String>> {
    let pb = progress_bar(dataset.len(), &format!("  {stage} "))?;
    let processed = dataset
        .texts
        .iter()
        .map(|text| {
            pb.inc(1);
            preprocessor.preprocess(text.as_str())
        })
        .collect();
    pb.finish_and_clear();
    Ok(processed)
}

fn progress_bar(len: usize, prefix: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!("{prefix}[{{bar:30}}] {{pos}}/{{len}} {{msg}} ({{eta}})"))
            .context("Invalid progress bar template")?,
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Dataset {
        let mut dataset = Dataset::default();
        for i in 0..12 {
            dataset.push(format!("thanks friend great idea number {i}"), [false; 6]);
            dataset.push(format!("stupid idiot troll loser {i}"), [true; 6]);
        }
        dataset
    }

    #[test]
    fn test_fit_produces_six_estimators() {
        let fitted = fit(&corpus(), &Preprocessor::default(), &TrainingOptions::default()).unwrap();
        assert_eq!(fitted.model.labels, ToxicityLabel::names());
        assert_eq!(fitted.summaries.len(), 6);
        assert_eq!(fitted.model.n_features, fitted.vectorizer.n_features());
    }

    #[test]
    fn test_train_reports_held_out_metrics() {
        let (_, report) =
            train(&corpus(), &Preprocessor::default(), &TrainingOptions::default()).unwrap();
        // ceil(0.2 * 24) = 5
        assert_eq!(report.test_size, 5);
        assert_eq!(report.train_size, 19);
        assert_eq!(report.labels.len(), 6);
        for label in &report.labels {
            assert!((0.0..=1.0).contains(&label.accuracy));
            assert!(label.log_loss.is_finite());
        }
    }

    #[test]
    fn test_single_class_label_names_the_label() {
        let mut dataset = Dataset::default();
        dataset.push("stupid troll", [true, false, false, false, false, false]);
        dataset.push("nice day", [false; 6]);
        let err = fit(&dataset, &Preprocessor::default(), &TrainingOptions::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("severe_toxic"));
    }
}
