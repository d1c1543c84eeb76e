//! Personas and the roster that defines the fan-out degree.

pub mod roster;

pub use roster::{Persona, Roster};
