//! Tile text conventions and letter values.
//!
//! Tile strings follow one convention throughout the workspace:
//! uppercase letters are regular tiles, lowercase letters are blanks
//! designated as that letter, and `.` marks a square played through.
//! Racks hold uppercase letters plus `?` for an undesignated blank.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Undesignated blank on a rack.
pub const BLANK: char = '?';

/// A square played through by a placement (already on the board).
pub const PLAY_THROUGH: char = '.';

/// Face value of a tile using the standard English distribution.
///
/// Blanks (lowercase letters or `?`) and play-through markers are worth 0.
pub fn letter_value(tile: char) -> i32 {
    match tile {
        'A' | 'E' | 'I' | 'L' | 'N' | 'O' | 'R' | 'S' | 'T' | 'U' => 1,
        'D' | 'G' => 2,
        'B' | 'C' | 'M' | 'P' => 3,
        'F' | 'H' | 'V' | 'W' | 'Y' => 4,
        'K' => 5,
        'J' | 'X' => 8,
        'Q' | 'Z' => 10,
        _ => 0,
    }
}

/// Check that a move's tile text follows the convention.
pub fn validate_move_tiles(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::InvalidTiles {
            text: text.to_string(),
            reason: "no tiles".to_string(),
        });
    }
    if let Some(bad) = text
        .chars()
        .find(|c| !(c.is_alphabetic() || *c == PLAY_THROUGH))
    {
        return Err(Error::InvalidTiles {
            text: text.to_string(),
            reason: format!("unexpected character '{}'", bad),
        });
    }
    if text.chars().all(|c| c == PLAY_THROUGH) {
        return Err(Error::InvalidTiles {
            text: text.to_string(),
            reason: "placement only plays through existing tiles".to_string(),
        });
    }
    Ok(())
}

/// Tiles held by a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rack(String);

impl Rack {
    /// Create a rack from its tile text.
    pub fn new(tiles: impl Into<String>) -> Self {
        Self(tiles.into())
    }

    /// Tile text as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the rack holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tiles on the rack.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Sum of the face values of the tiles on the rack.
    pub fn value(&self) -> i32 {
        self.0.chars().map(letter_value).sum()
    }
}

impl std::fmt::Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
