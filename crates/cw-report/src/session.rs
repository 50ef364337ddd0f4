//! Report session: owns the report stream and drives rendering.

use crate::collaborators::{BoardModel, BoardRenderer, EvaluationEngine, TextSanitizer};
use crate::config::ReportConfig;
use crate::error::{ReportDiagnostic, ReportError, Result};
use crate::image::PngBoardRenderer;
use crate::naming::AssetNamer;
use crate::renderer::{AssetOutcome, PositionRenderer};
use crate::sanitize::HtmlSanitizer;
use cw_common::{Board, Game, Position};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Document title.
pub const REPORT_TITLE: &str = "Graphical Game Report";

const POSITION_SEPARATOR: &str = "\n";

/// State of the lazily opened report document.
enum ReportStream {
    Unopened,
    Open(BufWriter<File>),
    /// Opening or writing failed; further writes are dropped.
    Failed,
}

/// Outcome of a finished report run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub report_path: PathBuf,
    pub image_mode: bool,
    pub positions_rendered: usize,
    pub assets_written: usize,
    pub assets_failed: usize,
    pub diagnostics: Vec<ReportDiagnostic>,
}

impl ReportSummary {
    /// Whether the run finished without surfacing any error.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// One report run.
///
/// The report stream is opened on first use and at most once. When it
/// cannot be opened or written, the failure is surfaced a single time and
/// every later write is a no-op, so the run still completes.
pub struct ReportSession {
    config: ReportConfig,
    namer: AssetNamer,
    sanitizer: Box<dyn TextSanitizer>,
    board_renderer: Box<dyn BoardRenderer>,
    stream: ReportStream,
    header_written: bool,
    diagnostics: Vec<ReportDiagnostic>,
    positions_rendered: usize,
    assets_written: usize,
    assets_failed: usize,
}

impl ReportSession {
    /// Create a session. Nothing is written until the first report call.
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let namer = AssetNamer::new(config.output_dir());
        Ok(Self {
            config,
            namer,
            sanitizer: Box::new(HtmlSanitizer),
            board_renderer: Box::new(PngBoardRenderer),
            stream: ReportStream::Unopened,
            header_written: false,
            diagnostics: Vec::new(),
            positions_rendered: 0,
            assets_written: 0,
            assets_failed: 0,
        })
    }

    /// Replace the text sanitizer.
    pub fn with_sanitizer(mut self, sanitizer: impl TextSanitizer + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    /// Replace the board image renderer.
    pub fn with_board_renderer(mut self, renderer: impl BoardRenderer + 'static) -> Self {
        self.board_renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn image_mode(&self) -> bool {
        self.config.generate_images
    }

    /// Path of the report document.
    pub fn report_path(&self) -> PathBuf {
        self.config.report_path()
    }

    /// Whether the report stream is currently open.
    pub fn is_open(&self) -> bool {
        matches!(self.stream, ReportStream::Open(_))
    }

    /// Errors surfaced so far, oldest first.
    pub fn diagnostics(&self) -> &[ReportDiagnostic] {
        &self.diagnostics
    }

    /// Write the document preamble and board key.
    pub fn report_header(&mut self, game: &Game) {
        if !self.ensure_open() {
            return;
        }
        if self.header_written {
            debug!("Report header already written");
            return;
        }

        let mut html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"generator\" content=\"cw-report {}\">\n\
             <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n",
            env!("CARGO_PKG_VERSION"),
            title = REPORT_TITLE,
        );
        if let Some(description) = game.description.as_deref().filter(|d| !d.is_empty()) {
            html.push_str(&format!("<p>{}</p>\n", self.sanitizer.sanitize(description)));
        }
        html.push_str(&Board::empty(game.layout()).html_key());
        html.push('\n');

        self.write_str(&html);
        self.header_written = true;
    }

    /// Report every position of `game` in order.
    pub fn report_game(
        &mut self,
        game: &Game,
        mut engine: Option<&mut (dyn EvaluationEngine + '_)>,
    ) {
        info!(
            positions = game.history().len(),
            images = self.image_mode(),
            analysis = engine.is_some(),
            "Reporting game"
        );
        self.report_header(game);
        for position in game.history() {
            self.report_position(position, engine.as_deref_mut());
        }
    }

    /// Render one position into the report.
    pub fn report_position(
        &mut self,
        position: &Position,
        engine: Option<&mut (dyn EvaluationEngine + '_)>,
    ) {
        if !self.ensure_open() {
            debug!(turn = position.turn_number, "Report stream unavailable, skipping position");
            return;
        }

        let images = if self.config.generate_images {
            Some(self.board_renderer.as_ref())
        } else {
            None
        };
        let fragment = PositionRenderer::new(
            &self.config,
            &self.namer,
            self.sanitizer.as_ref(),
            images,
        )
        .render(position, engine);

        for asset in fragment.assets {
            match asset.outcome {
                AssetOutcome::Written { path, bytes } => {
                    debug!(path = %path.display(), bytes, "Wrote image");
                    self.assets_written += 1;
                }
                AssetOutcome::Failed(err) => {
                    self.assets_failed += 1;
                    self.surface(err);
                }
            }
        }

        self.write_str(&fragment.html);
        self.write_str(POSITION_SEPARATOR);
        self.positions_rendered += 1;
        debug!(
            turn = position.turn_number,
            moves = fragment.moves_listed,
            "Reported position"
        );
    }

    /// Close the document and report what happened.
    pub fn finish(mut self) -> ReportSummary {
        if self.is_open() {
            self.write_str("</body>\n</html>\n");
        }
        let path = self.report_path();
        let flushed = match &mut self.stream {
            ReportStream::Open(writer) => writer.flush(),
            _ => Ok(()),
        };
        if let Err(source) = flushed {
            self.stream = ReportStream::Failed;
            self.surface(ReportError::OutputWrite { path, source });
        }

        let summary = ReportSummary {
            report_path: self.report_path(),
            image_mode: self.image_mode(),
            positions_rendered: self.positions_rendered,
            assets_written: self.assets_written,
            assets_failed: self.assets_failed,
            diagnostics: std::mem::take(&mut self.diagnostics),
        };
        info!(
            path = %summary.report_path.display(),
            positions = summary.positions_rendered,
            assets_written = summary.assets_written,
            assets_failed = summary.assets_failed,
            diagnostics = summary.diagnostics.len(),
            "Report finished"
        );
        summary
    }

    /// Open the stream on first use. Returns whether it is usable.
    fn ensure_open(&mut self) -> bool {
        match self.stream {
            ReportStream::Open(_) => return true,
            ReportStream::Failed => return false,
            ReportStream::Unopened => {}
        }

        match self.open_stream() {
            Ok(writer) => {
                info!(
                    path = %self.report_path().display(),
                    images = self.image_mode(),
                    "Opened report"
                );
                self.stream = ReportStream::Open(writer);
                true
            }
            Err(err) => {
                self.stream = ReportStream::Failed;
                self.surface(err);
                false
            }
        }
    }

    fn open_stream(&self) -> Result<BufWriter<File>> {
        if self.config.generate_images {
            let dir = self.config.output_dir();
            std::fs::create_dir_all(dir).map_err(|source| open_error(dir, source))?;
        }
        let path = self.report_path();
        let file = File::create(&path).map_err(|source| open_error(&path, source))?;
        Ok(BufWriter::new(file))
    }

    fn write_str(&mut self, text: &str) {
        let result = match &mut self.stream {
            ReportStream::Open(writer) => writer.write_all(text.as_bytes()),
            _ => return,
        };
        if let Err(source) = result {
            self.stream = ReportStream::Failed;
            let path = self.report_path();
            self.surface(ReportError::OutputWrite { path, source });
        }
    }

    /// Record an error on the diagnostics channel.
    fn surface(&mut self, err: ReportError) {
        let diagnostic = ReportDiagnostic::from(&err);
        error!(
            kind = ?diagnostic.kind,
            path = ?diagnostic.path,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }
}

fn open_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::OutputOpen {
        path: path.to_path_buf(),
        source,
    }
}
