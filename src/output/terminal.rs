// Colored terminal output for analyses, training reports and model status.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use super::{score_bar, truncate_chars};
use crate::model::vectorizer::TfIdfVectorizer;
use crate::model::MultiOutputClassifier;
use crate::toxicity::examples::ExampleComment;
use crate::toxicity::{Analysis, Interpretation, Verdict};
use crate::training::TrainingReport;

const BAR_WIDTH: usize = 30;

/// Display the full analysis of one comment.
pub fn display_analysis(analysis: &Analysis, show_processed: bool) {
    println!();
    match analysis.verdict {
        Verdict::Toxic => println!(
            "  {} {}",
            "!!".red().bold(),
            analysis.verdict.headline().red().bold()
        ),
        Verdict::Clean => println!(
            "  {} {}",
            "ok".green().bold(),
            analysis.verdict.headline().green()
        ),
    }

    println!("\n{}", "=== Detailed Analysis ===".bold());
    for (label, score) in analysis.scores.iter() {
        println!(
            "  {:<14} {} {:>5.1}%",
            label.title(),
            colorize_score(score, &score_bar(score, BAR_WIDTH)),
            score * 100.0
        );
    }

    if show_processed {
        println!("\n{}", "=== Processed Text ===".bold());
        if analysis.processed_text.is_empty() {
            println!("  {}", "(empty after preprocessing)".dimmed());
        } else {
            println!("  {}", analysis.processed_text.dimmed());
        }
    }

    println!("\n{}", "=== Interpretation ===".bold());
    let message = analysis.interpretation.message();
    match analysis.interpretation {
        Interpretation::HighlyToxic => println!("  {}", message.red()),
        Interpretation::SignsOfToxicity => println!("  {}", message.yellow()),
        Interpretation::Clean => println!("  {}", message.green()),
    }
    println!();
}

/// List the built-in example comments.
pub fn display_examples(examples: &[ExampleComment]) {
    println!("\n{}", "=== Example Comments ===".bold());
    for example in examples {
        println!("  {:<18} \"{}\"", example.name, example.text.dimmed());
    }
    println!("\n{}", "Try one with: toxfilter analyze \"<text>\"".dimmed());
}

/// Display held-out evaluation after training.
pub fn display_training_report(report: &TrainingReport) {
    println!(
        "\n{}",
        format!(
            "=== Training Report ({} train / {} test, {} features) ===",
            report.train_size, report.test_size, report.n_features
        )
        .bold()
    );
    println!(
        "  {:<14} {:>9} {:>9} {:>9} {:>9}  {}",
        "Label".dimmed(),
        "Pos train".dimmed(),
        "Pos test".dimmed(),
        "Accuracy".dimmed(),
        "Log loss".dimmed(),
        "Fit".dimmed(),
    );
    println!("  {}", "-".repeat(70).dimmed());
    for label in &report.labels {
        let fit = if label.converged {
            format!("{} iters", label.iterations).green()
        } else {
            format!("{} iters (not converged)", label.iterations).yellow()
        };
        println!(
            "  {:<14} {:>9} {:>9} {:>8.1}% {:>9.4}  {}",
            label.label,
            label.train_positives,
            label.test_positives,
            label.accuracy * 100.0,
            label.log_loss,
            fit
        );
    }
    println!();
}

/// Display model directory and, when loaded, what the artifacts contain.
pub fn display_status(
    model_dir: &std::path::Path,
    loaded: Option<(&TfIdfVectorizer, &MultiOutputClassifier)>,
) {
    println!("Model directory: {}", model_dir.display());
    match loaded {
        Some((vectorizer, model)) => {
            println!("Model: {}", "ready".green());
            println!(
                "  Vocabulary: {} terms (cap {})",
                vectorizer.n_features(),
                vectorizer.max_features()
            );
            println!("  Labels: {}", model.labels.join(", "));
            println!("  Trained: {}", model.trained_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None => {
            println!("Model: {}", "not found".yellow());
            println!("  Run `toxfilter train --csv <train.csv>` to create it");
        }
    }
}

/// One-line summary used in batch-style output.
pub fn display_score_line(text: &str, analysis: &Analysis) {
    let max = format!("{:.2}", analysis.max_score);
    let verdict = match analysis.verdict {
        Verdict::Toxic => max.red(),
        Verdict::Clean => max.green(),
    };
    println!("  [{}] {}", verdict, truncate_chars(text, 100).dimmed());
}

/// Color a rendered bar by the score it represents.
fn colorize_score(score: f64, text: &str) -> colored::ColoredString {
    if score > crate::toxicity::verdict::HIGH_TOXICITY_THRESHOLD {
        text.red().bold()
    } else if score > crate::toxicity::verdict::TOXIC_THRESHOLD {
        text.bright_red()
    } else if score > 0.2 {
        text.yellow()
    } else {
        text.green()
    }
}
