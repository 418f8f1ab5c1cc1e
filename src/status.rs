// Model status display: shows the model directory and what's in it.

use anyhow::Result;

use crate::config::Config;
use crate::model::artifacts;
use crate::output::terminal;

/// Display model status to the terminal.
///
/// Missing artifacts are reported, not treated as an error. Artifacts that
/// exist but fail to load are an error.
pub fn show(config: &Config) -> Result<()> {
    if !artifacts::artifacts_present(&config.model_dir) {
        terminal::display_status(&config.model_dir, None);
        return Ok(());
    }

    let vectorizer = artifacts::load_vectorizer(&config.model_dir)?;
    let model = artifacts::load_model(&config.model_dir)?;
    terminal::display_status(&config.model_dir, Some((&vectorizer, &model)));

    let size: u64 = [
        artifacts::vectorizer_path(&config.model_dir),
        artifacts::model_path(&config.model_dir),
    ]
    .iter()
    .filter_map(|path| std::fs::metadata(path).ok())
    .map(|meta| meta.len())
    .sum();
    println!("  Artifacts on disk: {}", format_bytes(size));
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
