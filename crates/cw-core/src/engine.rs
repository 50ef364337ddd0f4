//! Evaluation engine backed by analysis stored in the game file.
//!
//! Each position may carry a ranked list of candidate moves with equities.
//! `RecordedEngine` replays that list instead of searching for moves, so a
//! report can show the analysis a game was saved with.

use cw_common::{Candidate, Move, Position};
use cw_report::EvaluationEngine;
use tracing::debug;

/// Replays recorded candidates.
#[derive(Debug, Clone, Default)]
pub struct RecordedEngine {
    pool: Vec<Candidate>,
}

impl RecordedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates for the current position, in recorded order.
    pub fn pool(&self) -> &[Candidate] {
        &self.pool
    }
}

impl EvaluationEngine for RecordedEngine {
    fn set_position(&mut self, position: &Position) {
        self.pool = position.analysis.clone();
        debug!(
            turn = position.turn_number,
            candidates = self.pool.len(),
            "Loaded recorded analysis"
        );
    }

    /// Moves not in the recorded analysis are valued at their score.
    fn consider_move(&mut self, mv: &Move) {
        if self.pool.iter().any(|c| c.mv == *mv) {
            return;
        }
        self.pool.push(Candidate::new(mv.clone(), f64::from(mv.score())));
    }

    fn moves(&mut self, count: usize) -> Vec<Move> {
        let mut ranked: Vec<&Candidate> = self.pool.iter().collect();
        ranked.sort_by(|a, b| b.equity.total_cmp(&a.equity));
        ranked.into_iter().take(count).map(|c| c.mv.clone()).collect()
    }
}
