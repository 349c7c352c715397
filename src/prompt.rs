//! Interactive line-by-line input.
//!
//! A plain "read a line, validate, continue or stop" loop over any
//! `BufRead`/`Write` pair. An empty line or end of input stops the loop;
//! callers get `None` when nothing usable was entered and write nothing.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use tracing::warn;

use crate::models::Race;

/// Reads player names and race scores from a terminal-like stream.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next line without its line ending, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        self.next_line()
    }

    /// Register players one per line until an empty line.
    ///
    /// Spaces are stripped from names. Returns `None` if no name was given.
    pub fn read_player_names(&mut self) -> io::Result<Option<Vec<String>>> {
        writeln!(
            self.output,
            "{} {}",
            "Register the players".bold(),
            "(empty line to finish)".dark_grey()
        )?;

        let mut names = Vec::new();
        loop {
            let question = format!("Player {}: ", names.len() + 1);
            let name = match self.ask(&question)? {
                Some(line) => line.replace(' ', ""),
                None => break,
            };
            if name.is_empty() {
                break;
            }
            names.push(name);
        }

        if names.is_empty() {
            warn!("Player registration cancelled");
            return Ok(None);
        }
        Ok(Some(names))
    }

    /// Ask for each participant's score, in starting order.
    ///
    /// Anything that is not an integer is rejected and asked again. Returns
    /// `None` if input ends or an empty line is entered.
    pub fn read_scores(
        &mut self,
        race_number: usize,
        race: &Race,
    ) -> io::Result<Option<HashMap<String, i64>>> {
        writeln!(self.output, "{}", format!("Results of race {race_number}").bold())?;

        let mut scores = HashMap::new();
        for name in race.players() {
            let question = format!("Score of {name}: ");
            loop {
                let line = match self.ask(&question)? {
                    Some(line) if !line.trim().is_empty() => line,
                    _ => {
                        warn!("Score entry for race {} cancelled", race_number);
                        return Ok(None);
                    }
                };
                match line.trim().parse::<i64>() {
                    Ok(score) => {
                        scores.insert(name.to_string(), score);
                        break;
                    }
                    Err(_) => writeln!(self.output, "{}", "Invalid score".red())?,
                }
            }
        }
        Ok(Some(scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_read_player_names_until_empty_line() {
        let mut p = prompter("Mario\nLu igi\r\n\nignored\n");

        let names = p.read_player_names().unwrap();

        assert_eq!(names, Some(vec!["Mario".to_string(), "Luigi".to_string()]));
        let out = output(p);
        assert!(out.contains("Player 1: "));
        assert!(out.contains("Player 3: "));
        assert!(!out.contains("Player 4: "));
    }

    #[test]
    fn test_read_player_names_eof_finishes() {
        let mut p = prompter("Peach\nDaisy");
        assert_eq!(
            p.read_player_names().unwrap(),
            Some(vec!["Peach".to_string(), "Daisy".to_string()])
        );
    }

    #[test]
    fn test_read_player_names_cancelled() {
        assert_eq!(prompter("\n").read_player_names().unwrap(), None);
        assert_eq!(prompter("").read_player_names().unwrap(), None);
    }

    #[test]
    fn test_read_scores_in_race_order() {
        let race = Race::from_players(["Mario", "Luigi", "Peach"]);
        let mut p = prompter("15\n-2\n0\n");

        let scores = p.read_scores(1, &race).unwrap().unwrap();

        assert_eq!(scores["Mario"], 15);
        assert_eq!(scores["Luigi"], -2);
        assert_eq!(scores["Peach"], 0);
        let out = output(p);
        let mario = out.find("Score of Mario").unwrap();
        let peach = out.find("Score of Peach").unwrap();
        assert!(mario < peach);
    }

    #[test]
    fn test_read_scores_reprompts_on_invalid() {
        let race = Race::from_players(["Mario", "Luigi"]);
        let mut p = prompter("ten\n10\n 4 \n");

        let scores = p.read_scores(2, &race).unwrap().unwrap();

        assert_eq!(scores["Mario"], 10);
        assert_eq!(scores["Luigi"], 4);
        let out = output(p);
        assert!(out.contains("Invalid score"));
        assert_eq!(out.matches("Score of Mario").count(), 2);
    }

    #[test]
    fn test_read_scores_cancelled() {
        let race = Race::from_players(["Mario", "Luigi"]);
        assert_eq!(prompter("3\n\n").read_scores(1, &race).unwrap(), None);
        assert_eq!(prompter("3\n").read_scores(1, &race).unwrap(), None);
    }
}
