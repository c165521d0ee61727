//! Gameweek type for the FPL season calendar.

use crate::error::{FplError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of gameweeks in a Premier League season.
pub const MAX_GAMEWEEKS: u16 = 38;

/// Type-safe wrapper for gameweek numbers (`1..=38`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Gameweek(u16);

impl Gameweek {
    /// Create a gameweek, rejecting numbers outside the season.
    pub fn new(gameweek: u16) -> Result<Self> {
        if (1..=MAX_GAMEWEEKS).contains(&gameweek) {
            Ok(Self(gameweek))
        } else {
            Err(FplError::InvalidGameweek {
                gameweek,
                max: MAX_GAMEWEEKS,
            })
        }
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Every gameweek of the season in ascending order.
    pub fn all() -> impl Iterator<Item = Gameweek> {
        (1..=MAX_GAMEWEEKS).map(Gameweek)
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Gameweek {
    type Error = FplError;

    fn try_from(gameweek: u16) -> Result<Self> {
        Self::new(gameweek)
    }
}

impl From<Gameweek> for u16 {
    fn from(gameweek: Gameweek) -> u16 {
        gameweek.0
    }
}

impl FromStr for Gameweek {
    type Err = FplError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.parse()?)
    }
}
