//! Whole-document JSON persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::StorageError;
use crate::models::Tournament;

/// A tournament file on disk.
#[derive(Debug, Clone)]
pub struct TournamentFile {
    path: PathBuf,
}

impl TournamentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the whole file.
    pub fn load(&self) -> Result<Tournament, StorageError> {
        if !self.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let tournament: Tournament = serde_json::from_str(&content)?;

        debug!(
            "Read tournament from {:?}: {} players, {} races",
            self.path,
            tournament.players.len(),
            tournament.races.len()
        );
        Ok(tournament)
    }

    /// Write a brand-new tournament. Refuses to replace an existing file
    /// unless `overwrite` is set.
    pub fn create(&self, tournament: &Tournament, overwrite: bool) -> Result<(), StorageError> {
        if self.exists() && !overwrite {
            return Err(StorageError::AlreadyExists(self.path.clone()));
        }
        self.save(tournament)?;
        info!("Created tournament file {:?}", self.path);
        Ok(())
    }

    /// Replace the file contents with `tournament`.
    ///
    /// Goes through a sibling temp file and a rename so readers never see
    /// a half-written document.
    pub fn save(&self, tournament: &Tournament) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let json = serde_json::to_string(tournament)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Wrote tournament to {:?}", self.path);
        Ok(())
    }

    /// Swap in the race list currently on disk.
    ///
    /// Called right before a result is merged, so races appended or
    /// scored by another process since `tournament` was loaded are kept.
    /// Only the races are refreshed; roster and round count are not.
    pub fn reload_races(&self, tournament: &mut Tournament) -> Result<(), StorageError> {
        let latest = self.load()?;
        if latest.races != tournament.races {
            debug!("Race list changed on disk since load, using latest");
        }
        tournament.races = latest.races;
        Ok(())
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
