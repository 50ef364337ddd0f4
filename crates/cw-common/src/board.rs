//! Boards: a layout plus the tiles placed on it.

use crate::error::{Error, Result};
use crate::layout::BoardLayout;
use crate::moves::Move;
use crate::tiles::PLAY_THROUGH;
use serde::{Deserialize, Serialize};

const EMPTY_SQUARE: char = '.';

/// Placed tiles over a board layout.
///
/// Rows hold one character per square: `.` for empty, an uppercase letter
/// for a regular tile, a lowercase letter for a designated blank. An empty
/// row list means an empty board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Dimensions and premium squares.
    #[serde(default)]
    pub layout: BoardLayout,
    /// Square contents, row by row.
    #[serde(default)]
    pub rows: Vec<String>,
}

impl Board {
    /// Empty board over a layout.
    pub fn empty(layout: BoardLayout) -> Self {
        let rows = vec![EMPTY_SQUARE.to_string().repeat(layout.width); layout.height];
        Self { layout, rows }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.layout.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.layout.height
    }

    /// Tile on a square, if any.
    pub fn tile_at(&self, row: usize, col: usize) -> Option<char> {
        self.rows
            .get(row)
            .and_then(|r| r.chars().nth(col))
            .filter(|c| *c != EMPTY_SQUARE)
    }

    /// Number of tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.chars().filter(|c| *c != EMPTY_SQUARE).count())
            .sum()
    }

    /// Whether no tiles have been placed.
    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    /// Board that results from making a move.
    ///
    /// Placement tiles are written onto their squares; play-through squares
    /// keep what is already there. Other move kinds leave the board as is.
    pub fn apply(&self, mv: &Move) -> Result<Board> {
        let (tiles, placement) = match mv {
            Move::Place {
                tiles, placement, ..
            } => (tiles, placement),
            _ => return Ok(self.clone()),
        };

        let mut grid = self.grid();
        for (offset, tile) in tiles.chars().enumerate() {
            let (row, col) = placement.square(offset);
            if !self.layout.contains(row, col) {
                return Err(Error::OutOfBounds {
                    mv: mv.detailed_string(),
                    width: self.width(),
                    height: self.height(),
                });
            }
            if tile != PLAY_THROUGH {
                grid[row][col] = tile;
            }
        }

        Ok(Board {
            layout: self.layout.clone(),
            rows: grid.into_iter().map(|r| r.into_iter().collect()).collect(),
        })
    }

    /// Check the layout and that contents match its dimensions.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if self.rows.is_empty() {
            return Ok(());
        }
        if self.rows.len() != self.height() {
            return Err(Error::InvalidBoard(format!(
                "expected {} rows, found {}",
                self.height(),
                self.rows.len()
            )));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.chars().count() != self.width() {
                return Err(Error::InvalidBoard(format!(
                    "row {} has {} squares, expected {}",
                    i + 1,
                    row.chars().count(),
                    self.width()
                )));
            }
            if let Some(bad) = row
                .chars()
                .find(|c| !(c.is_alphabetic() || *c == EMPTY_SQUARE))
            {
                return Err(Error::InvalidBoard(format!(
                    "row {}: unexpected character '{}'",
                    i + 1,
                    bad
                )));
            }
        }
        Ok(())
    }

    fn grid(&self) -> Vec<Vec<char>> {
        (0..self.height())
            .map(|row| {
                (0..self.width())
                    .map(|col| self.tile_at(row, col).unwrap_or(EMPTY_SQUARE))
                    .collect()
            })
            .collect()
    }
}
