// Labeled comment dataset, read from CSV.
//
// The CSV needs a header row with `comment_text` and one 0/1 column per
// toxicity label. Any other columns (an `id`, say) are ignored. A missing
// or empty comment is treated as the empty string.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::toxicity::ToxicityLabel;

/// Label flags for one comment, in `ToxicityLabel::ALL` order.
pub type LabelRow = [bool; ToxicityLabel::COUNT];

#[derive(Debug, Deserialize)]
struct CommentRecord {
    #[serde(default)]
    comment_text: Option<String>,
    toxic: u8,
    severe_toxic: u8,
    obscene: u8,
    threat: u8,
    insult: u8,
    identity_hate: u8,
}

impl CommentRecord {
    fn into_row(self, line: usize) -> Result<(String, LabelRow)> {
        let raw = [
            self.toxic,
            self.severe_toxic,
            self.obscene,
            self.threat,
            self.insult,
            self.identity_hate,
        ];
        let mut labels = [false; ToxicityLabel::COUNT];
        for ((flag, value), label) in labels.iter_mut().zip(raw).zip(ToxicityLabel::ALL) {
            *flag = match value {
                0 => false,
                1 => true,
                other => anyhow::bail!("Row {line}: {label} must be 0 or 1, got {other}"),
            };
        }
        Ok((self.comment_text.unwrap_or_default(), labels))
    }
}

/// Comments with their label flags, index-aligned.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<LabelRow>,
}

impl Dataset {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open training CSV: {}", path.display()))?;
        let dataset = Self::from_reader(file)
            .with_context(|| format!("Failed to read training CSV: {}", path.display()))?;
        info!(rows = dataset.len(), "Loaded training data from {}", path.display());
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut dataset = Self::default();
        for (i, record) in csv_reader.deserialize::<CommentRecord>().enumerate() {
            // Header is line 1
            let line = i + 2;
            let record = record.with_context(|| format!("Malformed row at line {line}"))?;
            let (text, labels) = record.into_row(line)?;
            dataset.push(text, labels);
        }
        if dataset.is_empty() {
            anyhow::bail!("Training CSV contains no rows");
        }
        Ok(dataset)
    }

    pub fn push(&mut self, text: impl Into<String>, labels: LabelRow) {
        self.texts.push(text.into());
        self.labels.push(labels);
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Targets for a single label, one per row.
    pub fn column(&self, label: ToxicityLabel) -> Vec<bool> {
        self.labels.iter().map(|row| row[label.index()]).collect()
    }

    /// Rows at the given indices, in that order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Number of positive rows for each label.
    pub fn positives(&self) -> [usize; ToxicityLabel::COUNT] {
        let mut counts = [0; ToxicityLabel::COUNT];
        for row in &self.labels {
            for (count, &flag) in counts.iter_mut().zip(row) {
                *count += usize::from(flag);
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,comment_text,toxic,severe_toxic,obscene,threat,insult,identity_hate
a1,\"Nice work, thanks!\",0,0,0,0,0,0
a2,you stupid troll,1,0,0,0,1,0
a3,,0,0,0,0,0,0
";

    #[test]
    fn test_reads_rows_and_ignores_extra_columns() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.texts[0], "Nice work, thanks!");
        assert_eq!(dataset.labels[1], [true, false, false, false, true, false]);
        assert_eq!(dataset.column(ToxicityLabel::Insult), vec![false, true, false]);
        assert_eq!(dataset.positives(), [1, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_missing_text_is_empty() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.texts[2], "");
    }

    #[test]
    fn test_rejects_non_binary_label() {
        let csv = "comment_text,toxic,severe_toxic,obscene,threat,insult,identity_hate\nhi,2,0,0,0,0,0\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("toxic must be 0 or 1"));
    }

    #[test]
    fn test_rejects_missing_label_column() {
        let csv = "comment_text,toxic\nhi,0\n";
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_empty_file() {
        let csv = "comment_text,toxic,severe_toxic,obscene,threat,insult,identity_hate\n";
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_subset_keeps_order() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        let sub = dataset.subset(&[2, 0]);
        assert_eq!(sub.texts, vec!["".to_string(), "Nice work, thanks!".to_string()]);
    }
}
