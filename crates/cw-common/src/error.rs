//! Error types for the game data model.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or manipulating game state.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading a game file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported game file schema.
    #[error("unsupported schema version: {actual} (supported: {supported})")]
    UnsupportedSchema { actual: String, supported: String },

    /// Board layout is malformed.
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    /// Board contents do not match the layout.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// Tile text contains characters outside the tile convention.
    #[error("invalid tile text '{text}': {reason}")]
    InvalidTiles { text: String, reason: String },

    /// A move does not fit on the board.
    #[error("move {mv} does not fit on a {width}x{height} board")]
    OutOfBounds { mv: String, width: usize, height: usize },

    /// A position references a player that does not exist.
    #[error("turn {turn}: unknown player id {player}")]
    UnknownPlayer { turn: u32, player: u32 },

    /// The game has no positions to report on.
    #[error("game history is empty")]
    EmptyHistory,
}

impl Error {
    /// Whether this error came from the game file contents rather than I/O.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Error::Io { .. })
    }
}
