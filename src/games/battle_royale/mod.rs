pub mod scoring;
pub mod types;
