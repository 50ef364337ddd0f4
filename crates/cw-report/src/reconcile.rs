//! Displayed move ranking.
//!
//! The engine's top candidates are shown as-is when they already include
//! the move that was played. Otherwise the played move takes the last slot:
//! the lowest-ranked candidate is dropped if the list is full, and the
//! played move is appended after the rest without re-sorting.

use cw_common::Move;

/// Moves shown per position unless configured otherwise.
pub const DEFAULT_MOVES_TO_SHOW: usize = 5;

/// Builds the bounded move list that always contains the played move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReconciler {
    limit: usize,
}

impl Default for MoveReconciler {
    fn default() -> Self {
        Self::new(DEFAULT_MOVES_TO_SHOW)
    }
}

impl MoveReconciler {
    /// Reconciler showing at most `limit` moves (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// Maximum list length.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Merge ranked `candidates` with the `played` move.
    pub fn reconcile(&self, mut candidates: Vec<Move>, played: Option<&Move>) -> Vec<Move> {
        candidates.truncate(self.limit);

        let Some(played) = played else {
            return candidates;
        };
        if candidates.contains(played) {
            return candidates;
        }

        if candidates.len() == self.limit {
            candidates.pop();
        }
        candidates.push(played.clone());
        candidates
    }
}
