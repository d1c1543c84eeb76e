//! Sampling parameters shared by every branch of a run.

pub mod config;

pub use config::{SamplingConfig, SamplingConfigBuilder};
