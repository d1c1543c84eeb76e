//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod count_occurrences;
pub mod fan_out;
pub mod generate_response;
pub mod run_consensus;
