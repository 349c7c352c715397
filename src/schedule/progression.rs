//! Round progression.
//!
//! Walks the rounds in order after every recorded result. The first
//! complete round whose successor has not been generated yet gets its
//! successor appended, seeded from the current leaderboard. At most one
//! round is generated per call, so calling again without new scores is a
//! no-op.

use rand::Rng;
use tracing::{debug, info};

use super::{partition, Shuffle};
use crate::calculate::seeding;
use crate::models::Tournament;

/// Where the tournament stands after a progression check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Some race of the earliest unfinished round still needs scores.
    InProgress,
    /// Round `round` (0-based) was just appended.
    RoundGenerated { round: usize },
    /// Every target round is complete.
    Finished,
}

impl Progress {
    pub fn is_finished(&self) -> bool {
        matches!(self, Progress::Finished)
    }
}

/// Check round completion and append the next round when one is due.
pub fn advance<R: Rng + ?Sized>(tournament: &mut Tournament, rng: &mut R) -> Progress {
    let target = tournament.rounds as usize;

    for round in 0..target {
        if !tournament.is_round_complete(round) {
            debug!("Round {} still in progress", round + 1);
            return Progress::InProgress;
        }
        if round + 1 == target {
            info!("All {} rounds complete", target);
            return Progress::Finished;
        }
        if tournament.round_exists(round + 1) {
            continue;
        }

        let races = partition(&seeding(tournament), Shuffle::WithinRace, rng);
        info!(
            "Round {} complete, generated {} races for round {}",
            round + 1,
            races.len(),
            round + 2
        );
        tournament.races.extend(races);
        return Progress::RoundGenerated { round: round + 1 };
    }

    Progress::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Race, RaceResult};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("P{i}")).collect()
    }

    /// Score every entry of race `index`, giving `base + position`.
    fn score_race(t: &mut Tournament, index: usize, base: i64) {
        let race = &mut t.races[index];
        for (pos, entry) in race.0.iter_mut().enumerate() {
            entry.score = Some(base + pos as i64);
        }
    }

    fn eight_player_tournament(rounds: u32) -> Tournament {
        let players = roster(8);
        let races = vec![
            Race::from_players(players[..4].to_vec()),
            Race::from_players(players[4..].to_vec()),
        ];
        Tournament::new(rounds, players, races)
    }

    #[test]
    fn test_incomplete_round_does_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut t = eight_player_tournament(2);
        score_race(&mut t, 0, 10);

        assert_eq!(advance(&mut t, &mut rng), Progress::InProgress);
        assert_eq!(t.races.len(), 2);
    }

    #[test]
    fn test_two_round_tournament_lifecycle() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut t = eight_player_tournament(2);

        score_race(&mut t, 0, 0);
        assert_eq!(advance(&mut t, &mut rng), Progress::InProgress);

        score_race(&mut t, 1, 100);
        assert_eq!(advance(&mut t, &mut rng), Progress::RoundGenerated { round: 1 });
        assert_eq!(t.races.len(), 4);
        assert!(t.races[2..].iter().all(Race::is_pending));

        score_race(&mut t, 2, 0);
        assert_eq!(advance(&mut t, &mut rng), Progress::InProgress);
        assert!(!t.is_finished());

        score_race(&mut t, 3, 0);
        assert_eq!(advance(&mut t, &mut rng), Progress::Finished);
        assert_eq!(t.races.len(), 4);
        assert!(t.is_finished());
    }

    #[test]
    fn test_next_round_is_seeded_from_leaderboard() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut t = eight_player_tournament(3);
        // P5..P8 score 100..103, P1..P4 score 0..3
        score_race(&mut t, 0, 0);
        score_race(&mut t, 1, 100);

        advance(&mut t, &mut rng);

        let mut top: Vec<&str> = t.races[2].players().collect();
        top.sort_unstable();
        assert_eq!(top, ["P5", "P6", "P7", "P8"]);
        let mut bottom: Vec<&str> = t.races[3].players().collect();
        bottom.sort_unstable();
        assert_eq!(bottom, ["P1", "P2", "P3", "P4"]);
    }

    #[test]
    fn test_advance_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut t = eight_player_tournament(3);
        score_race(&mut t, 0, 0);
        score_race(&mut t, 1, 5);

        advance(&mut t, &mut rng);
        let after_first = serde_json::to_string(&t).unwrap();

        assert_eq!(advance(&mut t, &mut rng), Progress::InProgress);
        assert_eq!(serde_json::to_string(&t).unwrap(), after_first);
    }

    #[test]
    fn test_resumed_session_skips_existing_rounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut t = eight_player_tournament(3);
        score_race(&mut t, 0, 0);
        score_race(&mut t, 1, 0);
        advance(&mut t, &mut rng);
        score_race(&mut t, 2, 0);
        score_race(&mut t, 3, 0);

        assert_eq!(advance(&mut t, &mut rng), Progress::RoundGenerated { round: 2 });
        assert_eq!(t.races.len(), 6);
    }

    #[test]
    fn test_single_round_finishes_without_generating() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut t = Tournament::new(
            1,
            roster(3),
            vec![Race(vec![
                RaceResult::new("P1").with_score(1),
                RaceResult::new("P2").with_score(2),
                RaceResult::new("P3").with_score(3),
            ])],
        );

        assert!(advance(&mut t, &mut rng).is_finished());
        assert_eq!(t.races.len(), 1);
    }
}
