//! Leaderboard calculation.
//!
//! Computes derived standings from the stored race list:
//! - Cumulative score per player
//! - Podium medals, with ties sharing a medal

use std::collections::HashMap;

use crate::models::{Medal, Standing, Tournament};

/// Sum every player's recorded scores across all races.
///
/// Unscored entries count as 0 and totals saturate at the `i64` bounds.
/// Sorted by total, highest first; equal totals keep the order in which
/// players first appear in the races. Players that are in no race are
/// left out.
pub fn leaderboard(tournament: &Tournament) -> Vec<Standing> {
    let mut standings: Vec<Standing> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in tournament.races.iter().flat_map(|race| race.entries()) {
        let slot = *index.entry(entry.name.as_str()).or_insert_with(|| {
            standings.push(Standing::new(entry.name.clone(), 0));
            standings.len() - 1
        });
        let total = &mut standings[slot].score;
        *total = total.saturating_add(entry.score.unwrap_or(0));
    }

    // sort_by is stable
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}

/// Player names in leaderboard order, used to seed the next round.
pub fn seeding(tournament: &Tournament) -> Vec<String> {
    leaderboard(tournament)
        .into_iter()
        .map(|standing| standing.name)
        .collect()
}

/// Medal for each row of a sorted leaderboard.
///
/// Each row uses up the next medal even when it ties an earlier total and
/// reuses that total's medal, so a shared gold leaves only bronze.
pub fn medals(standings: &[Standing]) -> Vec<Option<Medal>> {
    let mut podium = Medal::PODIUM.iter().copied();
    let mut awarded: HashMap<i64, Medal> = HashMap::new();

    standings
        .iter()
        .map(|standing| {
            let next = podium.next();
            match awarded.get(&standing.score) {
                Some(medal) => Some(*medal),
                None => {
                    let medal = next?;
                    awarded.insert(standing.score, medal);
                    Some(medal)
                }
            }
        })
        .collect()
}
