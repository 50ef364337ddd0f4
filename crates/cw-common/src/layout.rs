//! Board layouts: dimensions and premium squares.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Premium square kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Premium {
    /// Plain square.
    None,
    /// Double letter score.
    DoubleLetter,
    /// Triple letter score.
    TripleLetter,
    /// Double word score.
    DoubleWord,
    /// Triple word score.
    TripleWord,
}

impl Premium {
    /// All premium kinds, in legend order.
    pub const ALL: [Premium; 5] = [
        Premium::None,
        Premium::DoubleLetter,
        Premium::TripleLetter,
        Premium::DoubleWord,
        Premium::TripleWord,
    ];

    /// Parse a layout code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '.' => Some(Premium::None),
            'd' => Some(Premium::DoubleLetter),
            't' => Some(Premium::TripleLetter),
            'D' => Some(Premium::DoubleWord),
            'T' => Some(Premium::TripleWord),
            _ => None,
        }
    }

    /// Layout code for this premium.
    pub fn code(&self) -> char {
        match self {
            Premium::None => '.',
            Premium::DoubleLetter => 'd',
            Premium::TripleLetter => 't',
            Premium::DoubleWord => 'D',
            Premium::TripleWord => 'T',
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Premium::None => "Plain square",
            Premium::DoubleLetter => "Double letter score",
            Premium::TripleLetter => "Triple letter score",
            Premium::DoubleWord => "Double word score",
            Premium::TripleWord => "Triple word score",
        }
    }

    /// Display colour as an RGB triple.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Premium::None => [0xe8, 0xe4, 0xd0],
            Premium::DoubleLetter => [0x9d, 0xd3, 0xf0],
            Premium::TripleLetter => [0x2f, 0x7f, 0xd0],
            Premium::DoubleWord => [0xf2, 0xb8, 0xc0],
            Premium::TripleWord => [0xd9, 0x3a, 0x3a],
        }
    }

    /// Display colour as a CSS hex string.
    pub fn css_color(&self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

const STANDARD_ROWS: [&str; 15] = [
    "T..d...T...d..T",
    ".D...t...t...D.",
    "..D...d.d...D..",
    "d..D...d...D..d",
    "....D.....D....",
    ".t...t...t...t.",
    "..d...d.d...d..",
    "T..d...D...d..T",
    "..d...d.d...d..",
    ".t...t...t...t.",
    "....D.....D....",
    "d..D...d...D..d",
    "..D...d.d...D..",
    ".D...t...t...D.",
    "T..d...T...d..T",
];

/// Board dimensions plus premium square grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// One string per row, one layout code per square.
    pub premiums: Vec<String>,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl BoardLayout {
    /// The standard 15x15 layout.
    pub fn standard() -> Self {
        Self {
            width: 15,
            height: 15,
            premiums: STANDARD_ROWS.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// A layout with no premium squares.
    pub fn plain(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            premiums: vec![".".repeat(width); height],
        }
    }

    /// Premium at a square; squares outside the grid are plain.
    pub fn premium_at(&self, row: usize, col: usize) -> Premium {
        self.premiums
            .get(row)
            .and_then(|r| r.chars().nth(col))
            .and_then(Premium::from_code)
            .unwrap_or(Premium::None)
    }

    /// Whether a square is inside the grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Premium kinds present on this layout, in legend order.
    pub fn premiums_present(&self) -> Vec<Premium> {
        Premium::ALL
            .into_iter()
            .filter(|p| {
                self.premiums
                    .iter()
                    .any(|row| row.chars().any(|c| c == p.code()))
            })
            .collect()
    }

    /// Check dimensions and codes.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.width > 26 {
            return Err(Error::InvalidLayout(format!(
                "unsupported dimensions {}x{}",
                self.width, self.height
            )));
        }
        if self.premiums.len() != self.height {
            return Err(Error::InvalidLayout(format!(
                "expected {} rows, found {}",
                self.height,
                self.premiums.len()
            )));
        }
        for (i, row) in self.premiums.iter().enumerate() {
            if row.chars().count() != self.width {
                return Err(Error::InvalidLayout(format!(
                    "row {} has {} squares, expected {}",
                    i + 1,
                    row.chars().count(),
                    self.width
                )));
            }
            if let Some(bad) = row.chars().find(|c| Premium::from_code(*c).is_none()) {
                return Err(Error::InvalidLayout(format!(
                    "row {}: unknown square code '{}'",
                    i + 1,
                    bad
                )));
            }
        }
        Ok(())
    }
}
