use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::model::artifacts;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override whatever is set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding tfidf_vectorizer.json and toxic_model.json
    pub model_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("TOXFILTER_MODEL_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(artifacts::default_model_dir);

        Ok(Self { model_dir })
    }

    /// Replace the model directory when a flag was given.
    pub fn with_model_dir(mut self, model_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = model_dir {
            self.model_dir = dir;
        }
        self
    }

    /// Check that both model artifacts exist.
    /// Call this before any operation that needs the trained classifier.
    pub fn require_model(&self) -> Result<()> {
        if !artifacts::artifacts_present(&self.model_dir) {
            anyhow::bail!(
                "Model files not found in {}\n\
                 Run `toxfilter train --csv <train.csv>` to create them,\n\
                 or set TOXFILTER_MODEL_DIR to a directory that has them.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}
