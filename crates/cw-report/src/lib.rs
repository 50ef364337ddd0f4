//! Graphical HTML reports for crossword game histories.
//!
//! A [`ReportSession`] walks a game's position history and writes one HTML
//! document with, per position:
//!
//! - a heading naming the player on turn (or `Game over.`)
//! - the board, inline as an HTML table or as a linked PNG image
//! - a score table in end-game-adjusted ranking order
//! - optionally, the engine's top candidate moves with the played move marked
//!
//! Failures to open the report or save an image are recorded as
//! [`ReportDiagnostic`]s and never abort the run.
//!
//! # Example
//!
//! ```no_run
//! use cw_common::Game;
//! use cw_report::{ReportConfig, ReportSession};
//! use std::path::Path;
//!
//! let game = Game::load(Path::new("game.json")).unwrap();
//! let config = ReportConfig::new("out").with_images(true);
//! let mut session = ReportSession::new(config).unwrap();
//! session.report_game(&game, None);
//! let summary = session.finish();
//! assert!(summary.is_clean());
//! ```

pub mod board_html;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod image;
pub mod naming;
pub mod reconcile;
pub mod renderer;
pub mod sanitize;
pub mod session;

pub use collaborators::{BoardModel, BoardRenderer, EvaluationEngine, TextSanitizer};
pub use config::{BoardCellSizes, CanvasSize, ReportConfig, MAX_CANVAS_SIDE};
pub use error::{DiagnosticKind, ReportDiagnostic, ReportError, Result};
pub use image::PngBoardRenderer;
pub use naming::AssetNamer;
pub use reconcile::{MoveReconciler, DEFAULT_MOVES_TO_SHOW};
pub use renderer::{AssetOutcome, PositionFragment, PositionRenderer, RenderedAsset};
pub use sanitize::{html_escape, HtmlSanitizer};
pub use session::{ReportSession, ReportSummary, REPORT_TITLE};
