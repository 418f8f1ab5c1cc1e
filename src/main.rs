use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use toxfilter::config::Config;
use toxfilter::model::logistic::LogisticParams;
use toxfilter::model::vectorizer::DEFAULT_MAX_FEATURES;
use toxfilter::output::terminal;
use toxfilter::preprocess::Preprocessor;
use toxfilter::toxicity::{self, examples, ToxicCommentClassifier};
use toxfilter::training::{self, split::DEFAULT_SEED, Dataset, TrainingOptions};

/// toxfilter: multi-label toxic comment classifier.
///
/// Scores a comment for six kinds of toxicity (toxic, severe toxic, obscene,
/// threat, insult, identity hate) with a TF-IDF + logistic regression model.
#[derive(Parser)]
#[command(name = "toxfilter", version, about)]
struct Cli {
    /// Model directory (overrides TOXFILTER_MODEL_DIR)
    #[arg(long, global = true)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a comment for toxicity
    Analyze {
        /// The comment text (read from stdin if omitted)
        text: Option<String>,

        /// Print machine-readable JSON instead of the colored report
        #[arg(long)]
        json: bool,

        /// Also show the preprocessed text the model sees
        #[arg(long)]
        show_processed: bool,
    },

    /// Show the preprocessed form of a comment
    Preprocess {
        /// The comment text (read from stdin if omitted)
        text: Option<String>,
    },

    /// List the built-in example comments
    Examples {
        /// Also score every example with the trained model
        #[arg(long)]
        analyze: bool,
    },

    /// Train the model from a labeled CSV
    Train {
        /// CSV with comment_text and the six label columns
        #[arg(long)]
        csv: PathBuf,

        /// Where to write the artifacts (defaults to the model directory)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Vocabulary size cap
        #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
        max_features: usize,

        /// Inverse L2 regularization strength
        #[arg(long, default_value_t = 1.0)]
        c: f64,

        /// Max gradient descent iterations per label
        #[arg(long, default_value_t = 1000)]
        max_iter: usize,

        /// Seed for the train/test shuffle
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Show model status (directory, vocabulary, labels, training time)
    Status,

    /// Serve the single-page web form
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("toxfilter=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?.with_model_dir(cli.model_dir);

    match cli.command {
        Commands::Analyze {
            text,
            json,
            show_processed,
        } => {
            let comment = read_comment(text)?;
            let classifier = load_classifier(&config)?;
            let analysis = toxicity::analyze(&classifier, &comment)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                terminal::display_analysis(&analysis, show_processed);
            }
        }

        Commands::Preprocess { text } => {
            let comment = read_comment(text)?;
            let processed = Preprocessor::default().preprocess(comment.as_str());
            println!("{processed}");
        }

        Commands::Examples { analyze } => {
            terminal::display_examples(&examples::EXAMPLES);
            if analyze {
                let classifier = load_classifier(&config)?;
                println!("\n{}", "=== Scores ===".bold());
                for example in &examples::EXAMPLES {
                    let analysis = toxicity::analyze(&classifier, example.text)?;
                    terminal::display_score_line(example.text, &analysis);
                }
            }
        }

        Commands::Train {
            csv,
            out,
            max_features,
            c,
            max_iter,
            seed,
        } => {
            let out_dir = out.unwrap_or_else(|| config.model_dir.clone());
            let options = TrainingOptions {
                max_features,
                params: LogisticParams {
                    c,
                    max_iter,
                    ..Default::default()
                },
                seed,
                ..Default::default()
            };

            let dataset = Dataset::from_path(&csv)?;
            println!("Training on {} comments from {}", dataset.len(), csv.display());

            let preprocessor = Preprocessor::default();
            let (fitted, report) = training::train(&dataset, &preprocessor, &options)?;
            terminal::display_training_report(&report);

            fitted.save(&out_dir)?;
            println!(
                "{}",
                format!("Model and vectorizer saved to {}", out_dir.display()).bold()
            );
        }

        Commands::Status => {
            toxfilter::status::show(&config)?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let classifier = load_classifier(&config)?;
            toxfilter::web::run_server(std::sync::Arc::new(classifier), port, &bind).await?;
        }
    }

    Ok(())
}

/// Load the trained classifier, with a friendly message when it's missing.
fn load_classifier(config: &Config) -> Result<ToxicCommentClassifier> {
    config.require_model()?;
    let classifier = ToxicCommentClassifier::load(&config.model_dir)?;
    info!("Loaded model from {}", config.model_dir.display());
    Ok(classifier)
}

/// Take the comment from the argument, or stdin when none was given.
/// Empty and whitespace-only comments are rejected.
fn read_comment(text: Option<String>) -> Result<String> {
    let comment = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read comment from stdin")?;
            buf
        }
    };
    if comment.trim().is_empty() {
        anyhow::bail!("Please enter a comment to analyze");
    }
    Ok(comment)
}
