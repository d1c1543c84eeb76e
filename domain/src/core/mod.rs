//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question to pose to the roster
//! - [`error::ConfigurationError`]: graph-construction errors

pub mod error;
pub mod question;
