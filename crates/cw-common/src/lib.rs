//! Crossword game data model shared across the cw workspace.
//!
//! This crate provides the game-state types the report pipeline reads:
//! - Tile text conventions and letter values
//! - Board layouts (premium squares) and placed-tile boards
//! - Moves as a tagged variant over the move kinds
//! - Players, positions, and whole games with JSON loading
//! - Common error types and CLI output formats

pub mod board;
pub mod error;
pub mod game;
pub mod layout;
pub mod moves;
pub mod output;
pub mod player;
pub mod position;
pub mod tiles;

pub use board::Board;
pub use error::{Error, Result};
pub use game::Game;
pub use layout::{BoardLayout, Premium};
pub use moves::{Move, Placement};
pub use output::OutputFormat;
pub use player::{Player, PlayerId};
pub use position::{Candidate, Position};
pub use tiles::{letter_value, Rack, BLANK, PLAY_THROUGH};

/// Schema version for game files.
pub const SCHEMA_VERSION: &str = "1.0.0";
