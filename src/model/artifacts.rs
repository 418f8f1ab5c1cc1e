// Model artifact files on disk.
//
// Two JSON files live side by side in the model directory:
//   tfidf_vectorizer.json: the fitted TfIdfVectorizer
//   toxic_model.json     : the fitted MultiOutputClassifier
//
// The directory defaults to a platform data directory
// (~/.local/share/toxfilter/models/ on Linux) so trained models persist
// across runs regardless of the working directory.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::vectorizer::TfIdfVectorizer;
use super::MultiOutputClassifier;

pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const MODEL_FILE: &str = "toxic_model.json";

/// Returns the default directory for storing model files.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toxfilter")
        .join("models")
}

pub fn vectorizer_path(dir: &Path) -> PathBuf {
    dir.join(VECTORIZER_FILE)
}

pub fn model_path(dir: &Path) -> PathBuf {
    dir.join(MODEL_FILE)
}

/// Check whether both artifact files exist.
pub fn artifacts_present(dir: &Path) -> bool {
    vectorizer_path(dir).exists() && model_path(dir).exists()
}

/// Load and validate the vectorizer from `dir`.
pub fn load_vectorizer(dir: &Path) -> Result<TfIdfVectorizer> {
    let path = vectorizer_path(dir);
    let vectorizer: TfIdfVectorizer = read_json(&path)?;
    vectorizer
        .validate()
        .with_context(|| format!("Corrupt vectorizer artifact: {}", path.display()))?;
    debug!(features = vectorizer.n_features(), "Loaded vectorizer from {}", path.display());
    Ok(vectorizer)
}

/// Load and validate the multi-output model from `dir`.
pub fn load_model(dir: &Path) -> Result<MultiOutputClassifier> {
    let path = model_path(dir);
    let model: MultiOutputClassifier = read_json(&path)?;
    model
        .validate()
        .with_context(|| format!("Corrupt model artifact: {}", path.display()))?;
    debug!(labels = model.labels.len(), "Loaded model from {}", path.display());
    Ok(model)
}

/// Write both artifacts into `dir`, creating it if needed.
///
/// Both files are written to temporaries first and only renamed into place
/// once both are complete, so a failed save leaves any previous pair intact.
pub fn save(dir: &Path, vectorizer: &TfIdfVectorizer, model: &MultiOutputClassifier) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    let staged = [
        (temp_path(&vectorizer_path(dir)), vectorizer_path(dir)),
        (temp_path(&model_path(dir)), model_path(dir)),
    ];
    let written =
        write_json(&staged[0].0, vectorizer).and_then(|_| write_json(&staged[1].0, model));
    if let Err(e) = written {
        for (tmp, _) in &staged {
            let _ = std::fs::remove_file(tmp);
        }
        return Err(e);
    }

    for (tmp, path) in &staged {
        std::fs::rename(tmp, path)
            .with_context(|| format!("Failed to move artifact into place: {}", path.display()))?;
    }
    info!("Saved model artifacts to {}", dir.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open artifact: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse artifact: {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create artifact: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("Failed to write artifact: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write artifact: {}", path.display()))?;
    writer
        .get_ref()
        .sync_all()
        .with_context(|| format!("Failed to sync artifact: {}", path.display()))
}
