pub mod analyze;
pub mod examples;
