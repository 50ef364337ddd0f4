//! Deterministic filenames for generated images.
//!
//! Names are built from the turn number, the player on turn and, for move
//! previews, the move's tiles and coordinates:
//!
//! ```text
//! 12-Alice-position.png
//! 12-Alice-QUACK-H8.png
//! 12-Alice-QU.cK_ef0f13aa-H8.png
//! 12-Al_ice_64e03cf9-position.png
//! ```
//!
//! Two different plays by the same player on the same turn differ in tiles
//! or coordinates, so their names differ. Coordinates encode orientation by
//! their order (`8H` across, `H8` down).
//!
//! A component that had to be rewritten to be path-safe, or that holds
//! blank (lowercase) tiles, gets a short SHA-256 suffix of its original
//! text. Names stay distinct when two player names sanitize alike and on
//! case-insensitive filesystems.

use cw_common::Move;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Bytes of the digest kept in a name suffix (8 hex chars).
const SUFFIX_BYTES: usize = 4;

/// Builds relative asset names and resolves them against the output directory.
#[derive(Debug, Clone)]
pub struct AssetNamer {
    output_dir: PathBuf,
}

impl AssetNamer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory assets are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Name of the board image for a position.
    pub fn position_image(&self, turn: u32, player: &str) -> String {
        format!("{}-{}-position.png", turn, safe_component(player))
    }

    /// Name of the preview image for a candidate placement.
    ///
    /// Only placements get previews; other move kinds yield `None`.
    pub fn move_image(&self, turn: u32, player: &str, mv: &Move) -> Option<String> {
        let placement = mv.placement()?;
        Some(format!(
            "{}-{}-{}-{}.png",
            turn,
            safe_component(player),
            tile_signature(&mv.pretty_tiles()),
            placement.coordinates()
        ))
    }

    /// Absolute path for a relative asset name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

/// Player names may hold anything; keep only characters safe in a path.
fn safe_component(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe == name {
        safe
    } else {
        format!("{}_{}", safe, short_digest(name))
    }
}

/// Tile text is uppercase letters and `.`; blanks and anything else mark
/// the signature for a digest suffix.
fn tile_signature(tiles: &str) -> String {
    let safe: String = tiles
        .chars()
        .map(|c| if c.is_alphabetic() || c == '.' { c } else { '_' })
        .collect();
    if safe == tiles && !tiles.chars().any(char::is_lowercase) {
        safe
    } else {
        format!("{}_{}", safe, short_digest(tiles))
    }
}

fn short_digest(text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    hex::encode(&hash[..SUFFIX_BYTES])
}
