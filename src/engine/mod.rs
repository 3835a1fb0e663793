pub mod error;
pub mod models;
pub mod strategy;
pub mod simulator;
pub mod population;
pub mod resample;
pub mod pipeline;
pub mod stats;
pub mod arena;
pub mod profiles;
pub mod report;
pub mod export;
