//! Game-state snapshots.

use crate::board::Board;
use crate::error::{Error, Result};
use crate::moves::Move;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// A candidate move recorded by an analysis pass, with its valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "move")]
    pub mv: Move,
    pub equity: f64,
}

impl Candidate {
    pub fn new(mv: Move, equity: f64) -> Self {
        Self { mv, equity }
    }
}

/// A single snapshot within a game's history.
///
/// `board` is the board at the start of the turn. `move_made` is a display
/// overlay: a move shown on top of the board without committing it. It is
/// never part of the saved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based turn number.
    pub turn_number: u32,
    /// Player on turn.
    pub current_player: PlayerId,
    /// Players in turn order.
    pub players: Vec<Player>,
    /// Board at the start of the turn.
    #[serde(default)]
    pub board: Board,
    /// The move actually played from this position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_move: Option<Move>,
    /// Display overlay.
    #[serde(skip)]
    pub move_made: Option<Move>,
    /// Whether the game has ended.
    #[serde(default)]
    pub game_over: bool,
    /// Recorded analysis, best first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analysis: Vec<Candidate>,
}

impl Position {
    /// Position with no committed move, overlay or analysis.
    pub fn new(turn_number: u32, current_player: PlayerId, players: Vec<Player>, board: Board) -> Self {
        Self {
            turn_number,
            current_player,
            players,
            board,
            committed_move: None,
            move_made: None,
            game_over: false,
            analysis: Vec::new(),
        }
    }

    /// Set the move played from this position.
    pub fn with_committed_move(mut self, mv: Move) -> Self {
        self.committed_move = Some(mv);
        self
    }

    /// Mark the position as terminal.
    pub fn with_game_over(mut self, game_over: bool) -> Self {
        self.game_over = game_over;
        self
    }

    /// Attach recorded analysis.
    pub fn with_analysis(mut self, analysis: Vec<Candidate>) -> Self {
        self.analysis = analysis;
        self
    }

    /// Whether the game has ended.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Player on turn, if present in the player list.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.id == self.current_player)
    }

    /// Name of the player on turn; empty when unknown.
    pub fn current_player_name(&self) -> &str {
        self.current_player().map(|p| p.name.as_str()).unwrap_or("")
    }

    /// Copy of this position with the overlay removed.
    pub fn cleared(&self) -> Position {
        Position {
            move_made: None,
            ..self.clone()
        }
    }

    /// Copy of this position showing `mv` as the overlay.
    pub fn with_move_made(&self, mv: Move) -> Position {
        Position {
            move_made: Some(mv),
            ..self.clone()
        }
    }

    /// Board with the overlay applied.
    pub fn board_after_overlay(&self) -> Result<Board> {
        match &self.move_made {
            Some(mv) => self.board.apply(mv),
            None => Ok(self.board.clone()),
        }
    }

    /// Players ranked by end-game-adjusted score, best first.
    ///
    /// When the game is over and a player went out, that player collects the
    /// value of every other rack and each other player loses their own rack
    /// value. Ties keep turn order.
    pub fn endgame_adjusted_scores(&self) -> Vec<Player> {
        let mut players = self.players.clone();

        if self.game_over && players.iter().any(|p| p.rack.is_empty()) {
            let leftover: i32 = players.iter().map(|p| p.rack.value()).sum();
            for player in &mut players {
                if player.rack.is_empty() {
                    player.score = player.score.saturating_add(leftover);
                } else {
                    player.score = player.score.saturating_sub(player.rack.value());
                }
            }
        }

        players.sort_by(|a, b| b.score.cmp(&a.score));
        players
    }

    /// Check the board and that the player on turn exists.
    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;
        if self.current_player().is_none() {
            return Err(Error::UnknownPlayer {
                turn: self.turn_number,
                player: self.current_player.0,
            });
        }
        if let Some(mv) = &self.committed_move {
            mv.validate()?;
        }
        for candidate in &self.analysis {
            candidate.mv.validate()?;
        }
        Ok(())
    }
}
