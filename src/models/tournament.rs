//! Tournament model — the persisted aggregate.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Race;

/// Most players a single race can hold.
pub const MAX_PLAYERS_PER_RACE: usize = 4;

/// Player roster, round target and the flat, append-only race list.
///
/// Rounds are not stored: round `i` is the `i`-th run of
/// [`Tournament::races_per_round`] consecutive races.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Number of rounds to play
    pub rounds: u32,

    /// Creation time in epoch milliseconds
    #[serde(default)]
    pub created: i64,

    /// Deduplicated roster, in registration order
    pub players: Vec<String>,

    /// All races generated so far, round by round
    pub races: Vec<Race>,
}

impl Tournament {
    /// Create a tournament stamped with the current time.
    pub fn new(rounds: u32, players: Vec<String>, races: Vec<Race>) -> Self {
        Self {
            rounds,
            created: Utc::now().timestamp_millis(),
            players,
            races,
        }
    }

    /// Width of every round, derived from the roster size.
    pub fn races_per_round(&self) -> usize {
        self.players.len().div_ceil(MAX_PLAYERS_PER_RACE).max(1)
    }

    /// Index of the round the next appended race would start, i.e. the
    /// number of fully generated rounds.
    pub fn current_round_index(&self) -> usize {
        self.races.len() / self.races_per_round()
    }

    /// Rounds with at least one race generated, counting a partly
    /// generated round.
    pub fn round_count_generated(&self) -> usize {
        self.races.len().div_ceil(self.races_per_round())
    }

    /// True once at least one race of round `round` exists.
    pub fn round_exists(&self, round: usize) -> bool {
        self.races.len() > round * self.races_per_round()
    }

    /// Races of round `round` that exist so far.
    pub fn round_slice(&self, round: usize) -> &[Race] {
        let width = self.races_per_round();
        let start = (round * width).min(self.races.len());
        let end = ((round + 1) * width).min(self.races.len());
        &self.races[start..end]
    }

    /// Every race of the round exists and is fully scored.
    pub fn is_round_complete(&self, round: usize) -> bool {
        let slice = self.round_slice(round);
        slice.len() == self.races_per_round() && slice.iter().all(Race::is_finished)
    }

    /// Every target round is complete.
    pub fn is_finished(&self) -> bool {
        self.rounds > 0 && (0..self.rounds as usize).all(|r| self.is_round_complete(r))
    }

    /// Index of the first race still missing scores.
    pub fn first_incomplete_race(&self) -> Option<usize> {
        self.races.iter().position(|race| !race.is_finished())
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }
}

/// Drop repeated names, keeping the first occurrence of each.
pub fn dedup_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RaceResult;
    use pretty_assertions::assert_eq;

    fn roster(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("P{i}")).collect()
    }

    fn scored(names: &[&str]) -> Race {
        names.iter().map(|n| RaceResult::new(*n).with_score(1)).collect()
    }

    #[test]
    fn test_races_per_round_rounds_up() {
        let cases = [(1, 1), (3, 1), (4, 1), (5, 2), (8, 2), (9, 3), (12, 3), (13, 4)];
        for (players, expected) in cases {
            let t = Tournament::new(1, roster(players), vec![]);
            assert_eq!(t.races_per_round(), expected, "{players} players");
        }
    }

    #[test]
    fn test_empty_roster_still_has_one_race_per_round() {
        let t = Tournament::new(1, vec![], vec![]);
        assert_eq!(t.races_per_round(), 1);
    }

    #[test]
    fn test_round_completion() {
        let mut t = Tournament::new(
            2,
            roster(8),
            vec![scored(&["P1", "P2", "P3", "P4"]), Race::from_players(["P5", "P6", "P7", "P8"])],
        );

        assert!(!t.is_round_complete(0));
        assert_eq!(t.first_incomplete_race(), Some(1));

        t.races[1] = scored(&["P5", "P6", "P7", "P8"]);
        assert!(t.is_round_complete(0));
        assert!(!t.is_round_complete(1));
        assert!(!t.is_finished());
        assert_eq!(t.current_round_index(), 1);
        assert!(!t.round_exists(1));
        assert_eq!(t.first_incomplete_race(), None);
    }

    #[test]
    fn test_round_count_generated() {
        let mut t = Tournament::new(2, roster(8), vec![]);
        assert_eq!(t.round_count_generated(), 0);

        t.races.push(Race::from_players(["P1", "P2", "P3", "P4"]));
        assert_eq!(t.round_count_generated(), 1);
        assert_eq!(t.current_round_index(), 0);

        t.races.push(Race::from_players(["P5", "P6", "P7", "P8"]));
        assert_eq!(t.round_count_generated(), 1);

        t.races.push(Race::from_players(["P1", "P5", "P2", "P6"]));
        assert_eq!(t.round_count_generated(), 2);
        assert_eq!(t.current_round_index(), 1);
    }

    #[test]
    fn test_empty_race_does_not_block_the_round() {
        let t = Tournament::new(
            1,
            roster(4),
            vec![scored(&["P1", "P2", "P3", "P4"]), Race::default()],
        );

        // 4 players give one race per round; the stray race belongs to round 2
        assert!(t.is_finished());
        assert_eq!(t.first_incomplete_race(), None);

        let t = Tournament::new(
            1,
            roster(5),
            vec![scored(&["P1", "P2", "P3"]), Race::default()],
        );
        assert!(t.is_round_complete(0));
        assert_eq!(t.first_incomplete_race(), None);
    }

    #[test]
    fn test_missing_race_makes_round_incomplete() {
        let t = Tournament::new(1, roster(8), vec![scored(&["P1", "P2", "P3", "P4"])]);

        assert_eq!(t.round_slice(0).len(), 1);
        assert!(!t.is_round_complete(0));
        assert!(!t.is_finished());
    }

    #[test]
    fn test_dedup_names_keeps_first_occurrence() {
        let names = dedup_names(["Toad", "Yoshi", "Toad", "toad", "Yoshi"]);
        assert_eq!(names, vec!["Toad", "Yoshi", "toad"]);
    }

    #[test]
    fn test_tournament_json_shape() {
        let t = Tournament {
            rounds: 3,
            created: 1_700_000_000_000,
            players: vec!["A".into(), "B".into()],
            races: vec![Race(vec![RaceResult::new("A").with_score(10), RaceResult::new("B")])],
        };

        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rounds": 3,
                "created": 1_700_000_000_000_i64,
                "players": ["A", "B"],
                "races": [[{"name": "A", "score": 10}, {"name": "B"}]]
            })
        );
    }

    #[test]
    fn test_missing_created_defaults_to_zero() {
        let t: Tournament =
            serde_json::from_str(r#"{"rounds":1,"players":["A"],"races":[[{"name":"A"}]]}"#)
                .unwrap();
        assert_eq!(t.created, 0);
    }
}
