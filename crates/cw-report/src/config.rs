//! Report configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 4096;

/// Logical canvas size for board images, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square canvas.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::square(500)
    }
}

/// Cell sizes for inline HTML boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCellSizes {
    /// Cell size while the game is in progress.
    #[serde(default = "default_in_progress_cell")]
    pub in_progress: u32,
    /// Cell size for the final position.
    #[serde(default = "default_game_over_cell")]
    pub game_over: u32,
}

fn default_in_progress_cell() -> u32 {
    25
}

fn default_game_over_cell() -> u32 {
    45
}

impl Default for BoardCellSizes {
    fn default() -> Self {
        Self {
            in_progress: default_in_progress_cell(),
            game_over: default_game_over_cell(),
        }
    }
}

impl BoardCellSizes {
    /// Cell size for a position.
    pub fn for_position(&self, game_over: bool) -> u32 {
        if game_over {
            self.game_over
        } else {
            self.in_progress
        }
    }
}

/// Complete report configuration.
///
/// Fixed for the lifetime of a session once handed to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Output directory in image mode, report file otherwise.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Generate PNG board images alongside the report.
    #[serde(default)]
    pub generate_images: bool,
    /// Report filename inside the output directory in image mode.
    #[serde(default = "default_index_filename")]
    pub index_filename: String,
    /// Canvas for board images.
    #[serde(default)]
    pub canvas: CanvasSize,
    /// Cell sizes for inline boards.
    #[serde(default)]
    pub cell_sizes: BoardCellSizes,
    /// Number of ranked moves shown per position.
    #[serde(default = "default_moves_to_show")]
    pub moves_to_show: usize,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("report.html")
}

fn default_index_filename() -> String {
    "index.html".to_string()
}

fn default_moves_to_show() -> usize {
    5
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            output: default_output(),
            generate_images: false,
            index_filename: default_index_filename(),
            canvas: CanvasSize::default(),
            cell_sizes: BoardCellSizes::default(),
            moves_to_show: default_moves_to_show(),
        }
    }
}

impl ReportConfig {
    /// Create a configuration writing to `output`.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    /// Set the output destination.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Enable image generation.
    pub fn with_images(mut self, enabled: bool) -> Self {
        self.generate_images = enabled;
        self
    }

    /// Set the image canvas.
    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the number of ranked moves shown.
    pub fn with_moves_to_show(mut self, moves: usize) -> Self {
        self.moves_to_show = moves;
        self
    }

    /// Directory images are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output
    }

    /// Path of the report document.
    pub fn report_path(&self) -> PathBuf {
        if self.generate_images {
            self.output.join(&self.index_filename)
        } else {
            self.output.clone()
        }
    }

    /// Check values the session relies on.
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig("output path is empty".to_string()));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReportError::InvalidConfig(format!(
                "canvas {}x{} has no area",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.canvas.width > MAX_CANVAS_SIDE || self.canvas.height > MAX_CANVAS_SIDE {
            return Err(ReportError::InvalidConfig(format!(
                "canvas {}x{} exceeds {} pixels per side",
                self.canvas.width, self.canvas.height, MAX_CANVAS_SIDE
            )));
        }
        if self.cell_sizes.in_progress == 0 || self.cell_sizes.game_over == 0 {
            return Err(ReportError::InvalidConfig(
                "board cell sizes must be positive".to_string(),
            ));
        }
        if self.moves_to_show == 0 {
            return Err(ReportError::InvalidConfig(
                "moves_to_show must be at least 1".to_string(),
            ));
        }
        if self.index_filename.is_empty()
            || self.index_filename.contains('/')
            || self.index_filename.contains('\\')
        {
            return Err(ReportError::InvalidConfig(format!(
                "index filename '{}' must be a plain file name",
                self.index_filename
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
