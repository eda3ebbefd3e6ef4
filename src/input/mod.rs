use std::path::Path;

use thiserror::Error;

pub mod cache;
pub mod config;
pub mod history;
pub mod players;

use history::{SharedHistoryTable, load_history};
use players::load_players;

use crate::model::player::PlayerCandidate;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub players: Vec<PlayerCandidate>,
    pub history: Option<SharedHistoryTable>,
}

pub fn load_input(players_path: &Path, history_path: Option<&Path>) -> Result<InputBundle, InputError> {
    if !players_path.exists() {
        return Err(InputError::MissingInput(format!(
            "candidate pool file {} not found",
            players_path.display()
        )));
    }
    let players = load_players(players_path)?;

    let history = match history_path {
        Some(path) if path.exists() => Some(load_history(path)?),
        Some(path) => {
            return Err(InputError::MissingInput(format!(
                "shared-history file {} not found",
                path.display()
            )));
        }
        None => {
            tracing::info!("no shared-history file; synergy falls back to role defaults");
            None
        }
    };

    tracing::info!(
        "loaded {} candidates from {}{}",
        players.len(),
        players_path.display(),
        history
            .as_ref()
            .map(|h| format!(", {} pair records", h.len()))
            .unwrap_or_default()
    );

    Ok(InputBundle {
        players,
        history,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
