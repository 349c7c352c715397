//! Tournament file storage.
//!
//! The whole tournament lives in one JSON document that is read in full
//! and rewritten in full by every state-changing command.

mod json;

pub use json::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Can't read tournament file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tournament file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Tournament file {} already exists (use --force to replace it)", .0.display())]
    AlreadyExists(PathBuf),
}
