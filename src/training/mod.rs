// Offline training: CSV dataset in, model artifacts out.

pub mod dataset;
pub mod split;
pub mod trainer;

pub use dataset::Dataset;
pub use trainer::{fit, train, FittedModel, TrainingOptions, TrainingReport};
