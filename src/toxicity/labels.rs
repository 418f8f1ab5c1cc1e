// The six toxicity labels and the per-label score vector.

use std::fmt;

use anyhow::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Toxicity categories, in the order the model emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToxicityLabel {
    Toxic,
    SevereToxic,
    Obscene,
    Threat,
    Insult,
    IdentityHate,
}

impl ToxicityLabel {
    pub const COUNT: usize = 6;

    /// Every label in model output order.
    pub const ALL: [ToxicityLabel; Self::COUNT] = [
        ToxicityLabel::Toxic,
        ToxicityLabel::SevereToxic,
        ToxicityLabel::Obscene,
        ToxicityLabel::Threat,
        ToxicityLabel::Insult,
        ToxicityLabel::IdentityHate,
    ];

    /// Stable snake_case name, also the CSV column name.
    pub fn as_str(self) -> &'static str {
        match self {
            ToxicityLabel::Toxic => "toxic",
            ToxicityLabel::SevereToxic => "severe_toxic",
            ToxicityLabel::Obscene => "obscene",
            ToxicityLabel::Threat => "threat",
            ToxicityLabel::Insult => "insult",
            ToxicityLabel::IdentityHate => "identity_hate",
        }
    }

    /// Human-readable title ("Severe Toxic").
    pub fn title(self) -> &'static str {
        match self {
            ToxicityLabel::Toxic => "Toxic",
            ToxicityLabel::SevereToxic => "Severe Toxic",
            ToxicityLabel::Obscene => "Obscene",
            ToxicityLabel::Threat => "Threat",
            ToxicityLabel::Insult => "Insult",
            ToxicityLabel::IdentityHate => "Identity Hate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == name)
    }

    /// Position in model output order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|label| label.as_str().to_string()).collect()
    }
}

impl fmt::Display for ToxicityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One probability per label, always fully populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToxicityScores([f64; ToxicityLabel::COUNT]);

impl ToxicityScores {
    /// Build from probabilities in label order. Every value must be a
    /// finite number in [0, 1].
    pub fn new(values: [f64; ToxicityLabel::COUNT]) -> Result<Self> {
        for (label, &value) in ToxicityLabel::ALL.iter().zip(&values) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                anyhow::bail!("Score for {label} is not a probability: {value}");
            }
        }
        Ok(Self(values))
    }

    /// Build from a slice that must hold exactly one value per label.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let array: [f64; ToxicityLabel::COUNT] = values.try_into().map_err(|_| {
            anyhow::anyhow!(
                "Expected {} scores, got {}",
                ToxicityLabel::COUNT,
                values.len()
            )
        })?;
        Self::new(array)
    }

    pub fn get(&self, label: ToxicityLabel) -> f64 {
        self.0[label.index()]
    }

    /// (label, score) pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (ToxicityLabel, f64)> + '_ {
        ToxicityLabel::ALL.iter().copied().zip(self.0.iter().copied())
    }

    /// Highest score across all labels.
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    pub fn as_array(&self) -> &[f64; ToxicityLabel::COUNT] {
        &self.0
    }
}

// Serialized as {"toxic": 0.1, "severe_toxic": 0.0, ...} in label order.
impl Serialize for ToxicityScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ToxicityLabel::COUNT))?;
        for (label, score) in self.iter() {
            map.serialize_entry(label.as_str(), &score)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_order_and_names() {
        let names: Vec<&str> = ToxicityLabel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(
            names,
            ["toxic", "severe_toxic", "obscene", "threat", "insult", "identity_hate"]
        );
        for (i, label) in ToxicityLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(ToxicityLabel::from_name(label.as_str()), Some(*label));
        }
        assert_eq!(ToxicityLabel::from_name("toxicity"), None);
        assert_eq!(ToxicityLabel::IdentityHate.title(), "Identity Hate");
    }

    #[test]
    fn test_scores_reject_non_probabilities() {
        assert!(ToxicityScores::new([0.0, 0.1, 0.2, 0.3, 0.4, 1.0]).is_ok());
        assert!(ToxicityScores::new([0.0, 0.1, 0.2, 0.3, 0.4, 1.5]).is_err());
        assert!(ToxicityScores::new([f64::NAN, 0.1, 0.2, 0.3, 0.4, 0.5]).is_err());
        assert!(ToxicityScores::from_slice(&[0.1, 0.2]).is_err());
    }

    #[test]
    fn test_max_and_get() {
        let scores = ToxicityScores::new([0.1, 0.05, 0.7, 0.2, 0.3, 0.0]).unwrap();
        assert!((scores.max() - 0.7).abs() < 1e-12);
        assert!((scores.get(ToxicityLabel::Obscene) - 0.7).abs() < 1e-12);
        assert_eq!(scores.iter().count(), 6);
    }

    #[test]
    fn test_serializes_in_label_order() {
        let scores = ToxicityScores::new([0.5, 0.0, 0.0, 0.0, 0.25, 1.0]).unwrap();
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(
            json,
            r#"{"toxic":0.5,"severe_toxic":0.0,"obscene":0.0,"threat":0.0,"insult":0.25,"identity_hate":1.0}"#
        );
    }
}
