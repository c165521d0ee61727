//! Error types for the FPL data client

use crate::cli::types::{ElementId, Position};
use thiserror::Error;


pub type Result<T> = std::result::Result<T, FplError>;

#[derive(Error, Debug)]
pub enum FplError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Unexpected response shape for {resource}: {detail}")]
    UnexpectedShape { resource: String, detail: String },

    #[error("Invalid position category: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid gameweek {gameweek}: must be between 1 and {max}")]
    InvalidGameweek { gameweek: u16, max: u16 },

    #[error("Element {id} appears more than once")]
    DuplicateElement { id: ElementId },

    #[error("Element {id} not found in general info")]
    UnknownElement { id: ElementId },

    #[error("Element {id} is not part of the current squad")]
    NotInSquad { id: ElementId },

    #[error(
        "Cannot pair transfers for {position}: {incoming} incoming vs {outgoing} outgoing"
    )]
    UnbalancedTransfer {
        position: Position,
        incoming: usize,
        outgoing: usize,
    },

    #[error("Squad must contain exactly {expected} picks, found {found}")]
    SquadSize { expected: usize, found: usize },

    #[error("No eligible element left for lineup slot {slot} (accepts {accepts})")]
    InfeasibleLineup { slot: usize, accepts: String },

    #[error("No vice-captain candidate outside the captain's club")]
    NoViceCaptain,
}

impl FplError {
    /// Shorthand for [`FplError::UnexpectedShape`].
    pub fn shape(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        FplError::UnexpectedShape {
            resource: resource.into(),
            detail: detail.into(),
        }
    }
}
