//! Terminal rendering of races and standings.
//!
//! Everything renders to a `String`; printing is left to the binary.

use std::fmt::Write;

use crossterm::style::Stylize;

use crate::calculate::{leaderboard, medals};
use crate::models::{Medal, RaceResult, Tournament};

/// One dotted `name.....score` line padded to `width` characters.
fn result_line(name: &str, score: Option<i64>, width: usize, medal: Option<Medal>) -> String {
    let score_text = score.unwrap_or(0).to_string();
    let dots = width.saturating_sub(name.chars().count() + score_text.chars().count());

    let mut line = format!("{}{}", name.cyan(), ".".repeat(dots).dark_grey());
    match score {
        Some(s) if s != 0 => write!(line, "{}", score_text.yellow()).ok(),
        _ => write!(line, "{}", score_text.dark_grey()).ok(),
    };
    if let Some(medal) = medal {
        write!(line, " {medal}").ok();
    }
    line
}

fn line_width<'a>(rows: impl Iterator<Item = (&'a str, Option<i64>)>) -> usize {
    rows.map(|(name, score)| name.chars().count() + score.unwrap_or(0).to_string().len())
        .max()
        .unwrap_or(0)
        + 1
}

/// Every race with its entries, best score first.
pub fn render_races(tournament: &Tournament) -> String {
    let width = line_width(
        tournament
            .races
            .iter()
            .flat_map(|race| race.entries())
            .map(|entry| (entry.name.as_str(), entry.score)),
    );

    let mut out = String::new();
    for (i, race) in tournament.races.iter().enumerate() {
        let mut entries: Vec<&RaceResult> = race.entries().iter().collect();
        // unscored entries sort last
        entries.sort_by(|a, b| b.score.cmp(&a.score));

        writeln!(out, "\n🏁 Race {}", i + 1).ok();
        for entry in entries {
            writeln!(out, "{}", result_line(&entry.name, entry.score, width, None)).ok();
        }
    }
    out
}

/// Cumulative standings with podium medals.
pub fn render_leaderboard(tournament: &Tournament) -> String {
    let standings = leaderboard(tournament);
    let width = line_width(standings.iter().map(|s| (s.name.as_str(), Some(s.score))));

    let mut out = String::from("\n🏆 Leaderboard\n");
    for (standing, medal) in standings.iter().zip(medals(&standings)) {
        writeln!(
            out,
            "{}",
            result_line(&standing.name, Some(standing.score), width, medal)
        )
        .ok();
    }
    out
}

/// Banner shown after a tournament is created.
pub fn render_welcome(tournament: &Tournament) -> String {
    format!(
        "\n{}\n{}\n",
        "Welcome to the new tournament!".bold(),
        format!("Nb. of rounds: {}", tournament.rounds).dark_grey()
    )
}
