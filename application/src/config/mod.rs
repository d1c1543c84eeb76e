//! Application-level configuration.
//!
//! - [`ExecutionParams`]: how branches are run (timeouts, attempts, failure policy)

pub mod execution_params;

pub use execution_params::ExecutionParams;
