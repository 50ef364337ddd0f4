//! Whole games and game-file loading.

use crate::error::{Error, Result};
use crate::layout::BoardLayout;
use crate::position::Position;
use crate::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// A game: its ordered position history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Game file schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Positions in play order.
    #[serde(default)]
    pub history: Vec<Position>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Game {
    /// Game from a position history.
    pub fn new(history: Vec<Position>) -> Self {
        Self {
            schema_version: default_schema_version(),
            description: None,
            history,
        }
    }

    /// Positions in play order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// The latest position.
    pub fn current_position(&self) -> Option<&Position> {
        self.history.last()
    }

    /// Layout of the current board; the standard layout for an empty game.
    pub fn layout(&self) -> BoardLayout {
        self.current_position()
            .map(|p| p.board.layout.clone())
            .unwrap_or_default()
    }

    /// Parse and validate a game from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let game: Game = serde_json::from_str(json)?;
        game.validate()?;
        Ok(game)
    }

    /// Read, parse and validate a game file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check schema version and every position.
    pub fn validate(&self) -> Result<()> {
        let major = |v: &str| v.split('.').next().map(str::to_string);
        if major(&self.schema_version) != major(SCHEMA_VERSION) {
            return Err(Error::UnsupportedSchema {
                actual: self.schema_version.clone(),
                supported: SCHEMA_VERSION.to_string(),
            });
        }
        if self.history.is_empty() {
            return Err(Error::EmptyHistory);
        }
        for position in &self.history {
            position.validate()?;
        }
        Ok(())
    }
}
