//! Race model — one contest among 3 or 4 players.

use serde::{Deserialize, Serialize};

/// A player's entry in a race. `score` stays `None` until results are in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    /// Player name
    pub name: String,

    /// Points scored in this race, omitted from the file until recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

impl RaceResult {
    /// Create an unscored entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: None,
        }
    }

    /// Builder method to set the score.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }
}

/// An ordered list of entries, fixed when the race is created.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Race(pub Vec<RaceResult>);

impl Race {
    /// Create a pending race for the given players, in order.
    pub fn from_players<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(players.into_iter().map(RaceResult::new).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[RaceResult] {
        &self.0
    }

    /// Participant names in starting order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|r| r.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|r| r.name == name)
    }

    /// True once every participant has a score. A race with no
    /// participants has nothing left to record.
    pub fn is_finished(&self) -> bool {
        self.0.iter().all(|r| r.score.is_some())
    }

    /// True while no participant has a score.
    pub fn is_pending(&self) -> bool {
        self.0.iter().all(|r| r.score.is_none())
    }

    /// Add an unscored participant.
    pub fn push_player(&mut self, name: impl Into<String>) {
        self.0.push(RaceResult::new(name));
    }

    /// Fill in every participant's score from `lookup`.
    ///
    /// Returns the first participant `lookup` has no score for, leaving the
    /// race untouched in that case.
    pub fn record_scores<F>(&mut self, lookup: F) -> Result<(), String>
    where
        F: Fn(&str) -> Option<i64>,
    {
        let mut scores = Vec::with_capacity(self.0.len());
        for entry in &self.0 {
            match lookup(&entry.name) {
                Some(score) => scores.push(score),
                None => return Err(entry.name.clone()),
            }
        }
        for (entry, score) in self.0.iter_mut().zip(scores) {
            entry.score = Some(score);
        }
        Ok(())
    }
}

impl FromIterator<RaceResult> for Race {
    fn from_iter<T: IntoIterator<Item = RaceResult>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
