//! Interfaces the report pipeline consumes.
//!
//! The pipeline never draws pixels, judges move legality, or ranks moves
//! itself. Those concerns sit behind these traits.

use crate::config::CanvasSize;
use crate::error::Result;
use cw_common::{Move, Position};

/// Board markup for the report document.
pub trait BoardModel {
    /// One-time descriptor of the board geometry (premium square key).
    fn html_key(&self) -> String;

    /// Inline board rendering with square cells of `cell_size` pixels.
    fn html_board(&self, cell_size: u32) -> String;
}

/// Automated move evaluation.
pub trait EvaluationEngine {
    /// Make `position` the working position.
    fn set_position(&mut self, position: &Position);

    /// Treat `mv` as already played, so the analysis accounts for it.
    fn consider_move(&mut self, mv: &Move);

    /// Up to `count` ranked candidate moves, best first.
    fn moves(&mut self, count: usize) -> Vec<Move>;
}

/// Pixel rendering of a position.
pub trait BoardRenderer {
    /// Encoded image of `position`, including its move overlay, drawn on a
    /// canvas of the given logical size. Must not mutate its input.
    fn render(&self, position: &Position, canvas: CanvasSize) -> Result<Vec<u8>>;
}

/// Escaping of user-entered text for embedding in report markup.
pub trait TextSanitizer {
    fn sanitize(&self, text: &str) -> String;
}
