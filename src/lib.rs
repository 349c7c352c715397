//! # mktm
//!
//! Mario Kart tournament maker: splits a roster into races of 3 or 4,
//! groups races into rounds and seeds each new round from the leaderboard.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (tournament, races, standings)
//! - **schedule**: Race partitioning and round progression
//! - **calculate**: Leaderboard and medal computation
//! - **lifecycle**: Create, add players, record results
//! - **storage**: Tournament file persistence
//! - **config**: Configuration loading and validation
//! - **prompt**: Interactive player and score entry
//! - **display**: Terminal rendering

pub mod calculate;
pub mod config;
pub mod display;
pub mod lifecycle;
pub mod models;
pub mod prompt;
pub mod schedule;
pub mod storage;

pub use models::*;
