//! Position categories used by FPL elements.

use crate::error::FplError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position category of an element.
///
/// The API encodes this as `element_type`, a small integer in `1..=4`.
///
/// # Examples
///
/// ```rust
/// use fpl_data::Position;
///
/// assert_eq!(Position::try_from(2).unwrap(), Position::Defender);
/// assert_eq!(Position::Forward.to_string(), "FWD");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// The `element_type` value the API uses for this category.
    pub fn to_u8(&self) -> u8 {
        match self {
            Position::Goalkeeper => 1,
            Position::Defender => 2,
            Position::Midfielder => 3,
            Position::Forward => 4,
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = FplError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Position::Goalkeeper),
            2 => Ok(Position::Defender),
            3 => Ok(Position::Midfielder),
            4 => Ok(Position::Forward),
            _ => Err(FplError::InvalidPosition {
                position: id.to_string(),
            }),
        }
    }
}

impl From<Position> for u8 {
    fn from(p: Position) -> u8 {
        p.to_u8()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = FplError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" | "GKP" | "GOALKEEPER" => Ok(Position::Goalkeeper),
            "DEF" | "DEFENDER" => Ok(Position::Defender),
            "MID" | "MIDFIELDER" => Ok(Position::Midfielder),
            "FWD" | "FORWARD" => Ok(Position::Forward),
            _ => Err(FplError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
