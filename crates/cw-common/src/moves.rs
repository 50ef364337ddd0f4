//! Moves as a tagged variant over the move kinds.

use crate::error::Result;
use crate::tiles::{validate_move_tiles, PLAY_THROUGH};
use serde::{Deserialize, Serialize};

/// Where a placement starts and which way it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// 0-based row of the first tile.
    pub row: usize,
    /// 0-based column of the first tile.
    pub col: usize,
    /// True for plays running left to right.
    pub horizontal: bool,
}

impl Placement {
    /// Horizontal placement starting at a square.
    pub fn across(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            horizontal: true,
        }
    }

    /// Vertical placement starting at a square.
    pub fn down(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            horizontal: false,
        }
    }

    /// Coordinate string: `8H` for across plays, `H8` for down plays.
    pub fn coordinates(&self) -> String {
        let column = column_letter(self.col);
        if self.horizontal {
            format!("{}{}", self.row.saturating_add(1), column)
        } else {
            format!("{}{}", column, self.row.saturating_add(1))
        }
    }

    /// Square covered by the `offset`-th tile of the play.
    pub fn square(&self, offset: usize) -> (usize, usize) {
        if self.horizontal {
            (self.row, self.col.saturating_add(offset))
        } else {
            (self.row.saturating_add(offset), self.col)
        }
    }
}

fn column_letter(col: usize) -> char {
    u8::try_from(col)
        .ok()
        .filter(|c| *c < 26)
        .map(|c| (b'A' + c) as char)
        .unwrap_or('?')
}

/// A move, played or proposed.
///
/// Equality identifies the play itself: kind, tiles and placement.
/// Scores are ignored so an engine's valuation of a play still matches
/// the same play recorded in the game history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Move {
    /// Tiles placed on the board.
    Place {
        tiles: String,
        placement: Placement,
        score: i32,
    },
    /// Tiles returned to the bag. Empty tiles means the exchange was not seen.
    Exchange {
        #[serde(default)]
        tiles: String,
    },
    /// Turn passed.
    Pass,
    /// End-of-game credit for an opponent's unplayed tiles.
    UnusedTilesBonus { tiles: String, score: i32 },
    /// Clock penalty.
    TimePenalty { score: i32 },
}

impl Move {
    /// Placement move.
    pub fn place(tiles: impl Into<String>, placement: Placement, score: i32) -> Self {
        Move::Place {
            tiles: tiles.into(),
            placement,
            score,
        }
    }

    /// Exchange move.
    pub fn exchange(tiles: impl Into<String>) -> Self {
        Move::Exchange {
            tiles: tiles.into(),
        }
    }

    /// Pass.
    pub fn pass() -> Self {
        Move::Pass
    }

    /// Short name of the move kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Move::Place { .. } => "place",
            Move::Exchange { .. } => "exchange",
            Move::Pass => "pass",
            Move::UnusedTilesBonus { .. } => "unused_tiles_bonus",
            Move::TimePenalty { .. } => "time_penalty",
        }
    }

    /// Score delta this move produces.
    pub fn score(&self) -> i32 {
        match self {
            Move::Place { score, .. }
            | Move::UnusedTilesBonus { score, .. }
            | Move::TimePenalty { score } => *score,
            Move::Exchange { .. } | Move::Pass => 0,
        }
    }

    /// Whether the move puts tiles on the board.
    pub fn is_place(&self) -> bool {
        matches!(self, Move::Place { .. })
    }

    /// Tile text, for kinds that carry tiles.
    pub fn tiles(&self) -> Option<&str> {
        match self {
            Move::Place { tiles, .. }
            | Move::Exchange { tiles }
            | Move::UnusedTilesBonus { tiles, .. } => Some(tiles),
            Move::Pass | Move::TimePenalty { .. } => None,
        }
    }

    /// Placement, for placement moves.
    pub fn placement(&self) -> Option<Placement> {
        match self {
            Move::Place { placement, .. } => Some(*placement),
            _ => None,
        }
    }

    /// Coordinate string, for placement moves.
    pub fn coordinates(&self) -> Option<String> {
        self.placement().map(|p| p.coordinates())
    }

    /// Tiles with play-through squares shown as `.` and blanks in lowercase.
    pub fn pretty_tiles(&self) -> String {
        self.tiles().unwrap_or_default().to_string()
    }

    /// Number of tiles the move takes from the rack.
    pub fn tiles_used(&self) -> usize {
        match self {
            Move::Place { tiles, .. } => tiles.chars().filter(|c| *c != PLAY_THROUGH).count(),
            Move::Exchange { tiles } => tiles.chars().count(),
            _ => 0,
        }
    }

    /// Detailed description used in move lists.
    pub fn detailed_string(&self) -> String {
        let base = match self {
            Move::Place {
                tiles, placement, ..
            } => return format!("{} {}", placement.coordinates(), tiles),
            Move::Exchange { tiles } if tiles.is_empty() => "- (exchange)".to_string(),
            Move::Exchange { tiles } => format!("-{}", tiles),
            Move::Pass => "- (pass)".to_string(),
            Move::UnusedTilesBonus { tiles, .. } => format!("({})", tiles),
            Move::TimePenalty { .. } => "(time penalty)".to_string(),
        };
        match self.score() {
            0 => base,
            score => format!("{} {}", base, score),
        }
    }

    /// Check tile text for kinds that carry tiles.
    pub fn validate(&self) -> Result<()> {
        match self {
            Move::Place { tiles, .. } => validate_move_tiles(tiles),
            _ => Ok(()),
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Move::Place {
                    tiles: a,
                    placement: pa,
                    ..
                },
                Move::Place {
                    tiles: b,
                    placement: pb,
                    ..
                },
            ) => a == b && pa == pb,
            (Move::Exchange { tiles: a }, Move::Exchange { tiles: b }) => a == b,
            (Move::Pass, Move::Pass) => true,
            (Move::UnusedTilesBonus { tiles: a, .. }, Move::UnusedTilesBonus { tiles: b, .. }) => {
                a == b
            }
            (Move::TimePenalty { .. }, Move::TimePenalty { .. }) => true,
            _ => false,
        }
    }
}

impl Eq for Move {}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detailed_string())
    }
}
