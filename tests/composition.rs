// Composition tests: verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   CSV -> Dataset -> Preprocessor -> TF-IDF -> LogisticRegression
//       -> artifacts on disk -> ToxicCommentClassifier -> Analysis
// on a small fixed corpus, with no network access. Artifacts go to
// temporary directories.

use std::path::Path;

use toxfilter::model::artifacts;
use toxfilter::model::logistic::{LogisticParams, LogisticRegression};
use toxfilter::model::MultiOutputClassifier;
use toxfilter::preprocess::lexicon::GAMING_SLANG;
use toxfilter::preprocess::{Lexicon, Preprocessor};
use toxfilter::toxicity::examples;
use toxfilter::toxicity::{self, ToxicCommentClassifier, ToxicityScorer, Verdict};
use toxfilter::training::{self, Dataset, TrainingOptions};

const ADJECTIVES: [&str; 12] = [
    "thoughtful", "kind", "careful", "honest", "fresh", "calm", "clear", "balanced", "useful",
    "helpful", "fair", "wise",
];

const INSULTS: [&str; 12] = [
    "loser", "idiot", "moron", "clown", "creep", "rat", "pig", "fool", "jerk", "scum", "slob",
    "twit",
];

/// Small fixed stopword list so the corpus vocabulary is predictable.
fn preprocessor() -> Preprocessor {
    Preprocessor::new(Lexicon::new(
        ["i", "am", "you", "are", "the", "a", "of", "do", "not", "your", "on", "this"],
        GAMING_SLANG,
    ))
}

/// Twelve clean and twelve hostile comments. Hostile rows carry every label.
fn corpus() -> Dataset {
    let mut dataset = Dataset::default();
    for (adjective, insult) in ADJECTIVES.iter().zip(INSULTS) {
        dataset.push(
            format!("I appreciate your {adjective} perspective on this matter."),
            [false; 6],
        );
        dataset.push(
            format!("I hope you die, you worthless piece of trash {insult}!"),
            [true; 6],
        );
    }
    dataset
}

fn options() -> TrainingOptions {
    TrainingOptions {
        params: LogisticParams {
            c: 10.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn write_csv(path: &Path, dataset: &Dataset) {
    let mut out =
        String::from("id,comment_text,toxic,severe_toxic,obscene,threat,insult,identity_hate\n");
    for (i, (text, labels)) in dataset.texts.iter().zip(&dataset.labels).enumerate() {
        let flags: Vec<&str> = labels.iter().map(|&f| if f { "1" } else { "0" }).collect();
        out.push_str(&format!("{i},\"{text}\",{}\n", flags.join(",")));
    }
    std::fs::write(path, out).unwrap();
}

// ============================================================
// Chain: Dataset -> fit -> save -> load -> predict
// ============================================================

#[test]
fn trained_model_separates_clean_and_hostile_examples() {
    let fitted = training::fit(&corpus(), &preprocessor(), &options()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    fitted.save(dir.path()).unwrap();

    let classifier = ToxicCommentClassifier::load_with(dir.path(), preprocessor()).unwrap();

    let clean = examples::find("Clean comment").unwrap().text;
    let hostile = examples::find("Severe toxicity").unwrap().text;

    let clean_scores = classifier.predict(clean).unwrap();
    let hostile_scores = classifier.predict(hostile).unwrap();
    assert!(clean_scores.max() < 0.5, "clean max = {}", clean_scores.max());
    assert!(hostile_scores.max() > 0.5, "hostile max = {}", hostile_scores.max());

    let analysis = toxicity::analyze(&classifier, hostile).unwrap();
    assert_eq!(analysis.verdict, Verdict::Toxic);
    assert_eq!(analysis.processed_text, "hope die worthless piec trash");
}

#[test]
fn predictions_are_six_probabilities() {
    let fitted = training::fit(&corpus(), &preprocessor(), &options()).unwrap();
    let classifier = fitted.into_classifier(preprocessor()).unwrap();

    for text in [
        "",
        "completely unseen vocabulary here",
        "🙂🙂🙂",
        "kys noob, you're trash at this game l2p",
    ] {
        let scores = classifier.predict(text).unwrap();
        assert_eq!(scores.iter().count(), 6);
        for (label, score) in scores.iter() {
            assert!(score.is_finite() && (0.0..=1.0).contains(&score), "{label} = {score}");
        }
    }
}

#[test]
fn in_memory_and_reloaded_classifiers_agree() {
    let fitted = training::fit(&corpus(), &preprocessor(), &options()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    fitted.save(dir.path()).unwrap();
    let in_memory = fitted.into_classifier(preprocessor()).unwrap();
    let reloaded = ToxicCommentClassifier::load_with(dir.path(), preprocessor()).unwrap();

    for example in &examples::EXAMPLES {
        let a = in_memory.predict(example.text).unwrap();
        let b = reloaded.predict(example.text).unwrap();
        for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-9, "{}: {x} vs {y}", example.name);
        }
    }
}

// ============================================================
// Chain: CSV -> train (split + evaluate) -> artifacts
// ============================================================

#[test]
fn csv_training_writes_loadable_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("train.csv");
    write_csv(&csv_path, &corpus());

    let dataset = Dataset::from_path(&csv_path).unwrap();
    assert_eq!(dataset.len(), 24);

    let (fitted, report) = training::train(&dataset, &preprocessor(), &options()).unwrap();
    assert_eq!(report.test_size, 5);
    assert_eq!(report.train_size, 19);
    assert_eq!(report.labels.len(), 6);
    assert_eq!(report.labels[0].label, "toxic");

    let model_dir = dir.path().join("models");
    fitted.save(&model_dir).unwrap();
    assert!(artifacts::artifacts_present(&model_dir));

    let model = artifacts::load_model(&model_dir).unwrap();
    assert_eq!(
        model.labels,
        ["toxic", "severe_toxic", "obscene", "threat", "insult", "identity_hate"]
    );
    assert!(ToxicCommentClassifier::load_with(&model_dir, preprocessor()).is_ok());
}

#[test]
fn same_seed_gives_same_model() {
    let dataset = corpus();
    let (a, _) = training::train(&dataset, &preprocessor(), &options()).unwrap();
    let (b, _) = training::train(&dataset, &preprocessor(), &options()).unwrap();
    assert_eq!(a.vectorizer.n_features(), b.vectorizer.n_features());
    for (x, y) in a.model.estimators().iter().zip(b.model.estimators()) {
        assert_eq!(x.coefficients, y.coefficients);
        assert_eq!(x.intercept, y.intercept);
    }
}

// ============================================================
// Initialization failures
// ============================================================

#[test]
fn nonexistent_model_dir_is_initialization_error() {
    let err = ToxicCommentClassifier::load(Path::new("/nonexistent/toxfilter/models"))
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "Failed to initialize classifier");
    assert!(format!("{err:#}").contains("/nonexistent/toxfilter/models"));
}

#[test]
fn missing_model_file_names_the_file() {
    let fitted = training::fit(&corpus(), &preprocessor(), &options()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    fitted.save(dir.path()).unwrap();
    std::fs::remove_file(artifacts::model_path(dir.path())).unwrap();

    let err = ToxicCommentClassifier::load(dir.path()).err().unwrap();
    assert!(format!("{err:#}").contains(artifacts::MODEL_FILE));
}

#[test]
fn wrong_label_set_is_rejected_at_load() {
    let fitted = training::fit(&corpus(), &preprocessor(), &options()).unwrap();
    let n = fitted.vectorizer.n_features();
    let partial = MultiOutputClassifier::new(
        vec!["toxic".into(), "insult".into()],
        vec![
            LogisticRegression {
                coefficients: vec![0.0; n],
                intercept: 0.0,
            };
            2
        ],
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    artifacts::save(dir.path(), &fitted.vectorizer, &partial).unwrap();
    let err = ToxicCommentClassifier::load(dir.path()).err().unwrap();
    assert_eq!(err.to_string(), "Failed to initialize classifier");
}
