//! Splitting a player pool into races.

use rand::Rng;

use super::shuffled;
use crate::models::{Race, MAX_PLAYERS_PER_RACE};

/// Where randomness is applied when building races.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shuffle {
    /// Shuffle the whole pool once, then cut it into races.
    Global,
    /// Keep the pool order (e.g. leaderboard seeding) and only shuffle
    /// the starting order inside each race.
    WithinRace,
}

/// Size of the next race given how many players are still unplaced.
///
/// Evaluated afresh after every race so the tail never ends up with a
/// lone player.
pub fn best_race_size(remaining: usize) -> usize {
    if remaining > 9
        || remaining % MAX_PLAYERS_PER_RACE == 0
        || remaining % MAX_PLAYERS_PER_RACE > MAX_PLAYERS_PER_RACE / 2
    {
        MAX_PLAYERS_PER_RACE
    } else {
        MAX_PLAYERS_PER_RACE - 1
    }
}

/// Cut `players` into consecutive races.
pub fn partition<R: Rng + ?Sized>(players: &[String], mode: Shuffle, rng: &mut R) -> Vec<Race> {
    let pool = match mode {
        Shuffle::Global => shuffled(players, rng),
        Shuffle::WithinRace => players.to_vec(),
    };

    let mut races = Vec::new();
    let mut rest = pool.as_slice();
    while !rest.is_empty() {
        let size = best_race_size(rest.len()).min(rest.len());
        let (chunk, tail) = rest.split_at(size);
        let members = match mode {
            Shuffle::Global => chunk.to_vec(),
            Shuffle::WithinRace => shuffled(chunk, rng),
        };
        races.push(Race::from_players(members));
        rest = tail;
    }
    races
}
