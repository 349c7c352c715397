//! Tournament lifecycle operations.
//!
//! Creation, late registration and result recording. Each operation
//! validates everything up front and only then mutates, so a rejected call
//! leaves the tournament exactly as it was.

use std::collections::HashMap;

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{dedup_names, Race, Tournament, MAX_PLAYERS_PER_RACE};
use crate::schedule::{advance, partition, Progress, Shuffle};

/// Broad category of a [`TournamentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; nothing about the tournament forbids the operation.
    Validation,
    /// The tournament's current state forbids the operation.
    Lifecycle,
}

/// Errors raised by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("Not a valid round number: {0}")]
    InvalidRoundCount(u32),

    #[error("No players registered")]
    NoPlayers,

    #[error("Missing score for {player} in race {}", .race + 1)]
    MissingScore { race: usize, player: String },

    #[error("{player} is not in race {}", .race + 1)]
    UnknownPlayer { race: usize, player: String },

    #[error("Wrong race nb: {}", .0 + 1)]
    RaceNotFound(usize),

    #[error("Race {} already processed", .0 + 1)]
    RaceAlreadyScored(usize),

    #[error("Too late to add players: round {} already started", .round + 1)]
    TooLate { round: usize },
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::InvalidRoundCount(_)
            | TournamentError::NoPlayers
            | TournamentError::MissingScore { .. }
            | TournamentError::UnknownPlayer { .. } => ErrorKind::Validation,
            TournamentError::RaceNotFound(_)
            | TournamentError::RaceAlreadyScored(_)
            | TournamentError::TooLate { .. } => ErrorKind::Lifecycle,
        }
    }
}

/// Placeholder roster `Player1..PlayerN`.
pub fn lazy_player_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Player{i}")).collect()
}

/// Build a tournament whose first round is drawn at random.
pub fn create_tournament<I, S, R>(
    names: I,
    rounds: u32,
    rng: &mut R,
) -> Result<Tournament, TournamentError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    R: Rng + ?Sized,
{
    if rounds < 1 {
        return Err(TournamentError::InvalidRoundCount(rounds));
    }

    let players = dedup_names(
        names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.trim().is_empty()),
    );
    if players.is_empty() {
        return Err(TournamentError::NoPlayers);
    }

    let races = partition(&players, Shuffle::Global, rng);
    info!(
        "Created tournament: {} players, {} rounds, {} races per round",
        players.len(),
        rounds,
        races.len()
    );

    Ok(Tournament::new(rounds, players, races))
}

/// Register players after creation. Only allowed during the first round.
///
/// Each newcomer joins the first pending race that still has room, or
/// starts a race of their own. Returns the names actually added; names
/// already on the roster are skipped.
pub fn add_players<I, S>(
    tournament: &mut Tournament,
    names: I,
) -> Result<Vec<String>, TournamentError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let round = tournament.current_round_index();
    if round > 1 {
        return Err(TournamentError::TooLate { round: round - 1 });
    }

    let requested = dedup_names(
        names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.trim().is_empty()),
    );
    if requested.is_empty() {
        return Err(TournamentError::NoPlayers);
    }

    let mut added = Vec::new();
    for name in requested {
        if tournament.has_player(&name) {
            warn!("{} is already registered", name);
            continue;
        }

        let open = tournament
            .races
            .iter_mut()
            .find(|race| race.len() < MAX_PLAYERS_PER_RACE && race.is_pending());
        match open {
            Some(race) => race.push_player(name.clone()),
            None => tournament.races.push(Race::from_players([name.clone()])),
        }
        tournament.players.push(name.clone());
        added.push(name);
    }

    info!("Added {} players", added.len());
    Ok(added)
}

/// Store a race's scores and run the round progression check.
///
/// `scores` must hold a score for every participant and nothing else.
pub fn record_race_result<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    index: usize,
    scores: &HashMap<String, i64>,
    rng: &mut R,
) -> Result<Progress, TournamentError> {
    let race = tournament
        .races
        .get_mut(index)
        .ok_or(TournamentError::RaceNotFound(index))?;

    if race.is_empty() || !race.is_pending() {
        return Err(TournamentError::RaceAlreadyScored(index));
    }

    if let Some(stranger) = scores.keys().find(|name| !race.contains(name)) {
        return Err(TournamentError::UnknownPlayer {
            race: index,
            player: stranger.clone(),
        });
    }

    race.record_scores(|name| scores.get(name).copied())
        .map_err(|player| TournamentError::MissingScore {
            race: index,
            player,
        })?;
    info!("Recorded results of race {}", index + 1);

    Ok(advance(tournament, rng))
}

/// Index of the first race that still needs results.
pub fn find_first_incomplete_race(tournament: &Tournament) -> Option<usize> {
    tournament.first_incomplete_race()
}
