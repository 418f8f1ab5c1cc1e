// toxfilter: multi-label toxic comment classification
//
// This is the library root. Each module corresponds to a stage of the
// pipeline: preprocess → vectorize → classify → present, plus the offline
// trainer that produces the model artifacts.

pub mod config;
pub mod model;
pub mod output;
pub mod preprocess;
pub mod status;
pub mod toxicity;
pub mod training;

#[cfg(feature = "web")]
pub mod web;
