//! Race scheduling.
//!
//! - **shuffle**: non-mutating random permutation
//! - **partition**: splits a player pool into races of 3 or 4
//! - **progression**: detects completed rounds and seeds the next one

mod partition;
mod progression;
mod shuffle;

pub use partition::*;
pub use progression::*;
pub use shuffle::*;
