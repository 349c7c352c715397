//! Core data models for the tournament maker.

mod race;
mod standing;
mod tournament;

pub use race::*;
pub use standing::*;
pub use tournament::*;
