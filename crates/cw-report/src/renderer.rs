//! Rendering of a single position into a report fragment.

use crate::collaborators::{BoardModel, BoardRenderer, EvaluationEngine, TextSanitizer};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::naming::AssetNamer;
use crate::reconcile::MoveReconciler;
use crate::sanitize::html_escape;
use cw_common::{Move, Position};
use std::fmt::Write;
use std::path::PathBuf;

/// Marker cell for the player on turn.
const CURRENT_PLAYER_MARKER: &str = "&rarr;";

/// Marker appended to the move that was actually played.
const PLAYED_MARKER: &str = " &nbsp;&larr;";

/// Outcome of saving one image.
#[derive(Debug)]
pub enum AssetOutcome {
    Written { path: PathBuf, bytes: usize },
    Failed(ReportError),
}

/// An image generated while rendering a position.
#[derive(Debug)]
pub struct RenderedAsset {
    /// Name relative to the output directory.
    pub filename: String,
    pub outcome: AssetOutcome,
}

impl RenderedAsset {
    pub fn is_written(&self) -> bool {
        matches!(self.outcome, AssetOutcome::Written { .. })
    }
}

/// Markup and images produced for one position.
#[derive(Debug, Default)]
pub struct PositionFragment {
    pub html: String,
    pub assets: Vec<RenderedAsset>,
    /// Number of entries in the move list (0 when absent).
    pub moves_listed: usize,
}

/// Renders header, board, score table and move list for a position.
///
/// Image mode is on exactly when a board renderer is supplied.
pub struct PositionRenderer<'a> {
    config: &'a ReportConfig,
    namer: &'a AssetNamer,
    sanitizer: &'a dyn TextSanitizer,
    images: Option<&'a dyn BoardRenderer>,
    reconciler: MoveReconciler,
}

impl<'a> PositionRenderer<'a> {
    pub fn new(
        config: &'a ReportConfig,
        namer: &'a AssetNamer,
        sanitizer: &'a dyn TextSanitizer,
        images: Option<&'a dyn BoardRenderer>,
    ) -> Self {
        Self {
            config,
            namer,
            sanitizer,
            images,
            reconciler: MoveReconciler::new(config.moves_to_show),
        }
    }

    /// Whether board images are generated.
    pub fn image_mode(&self) -> bool {
        self.images.is_some()
    }

    /// Render `position`, consulting `engine` for the move list.
    pub fn render(
        &self,
        position: &Position,
        engine: Option<&mut (dyn EvaluationEngine + '_)>,
    ) -> PositionFragment {
        let mut fragment = PositionFragment::default();

        self.render_board(position, &mut fragment);
        fragment.html.push_str(&self.score_table(position));

        if let Some(engine) = engine {
            if !position.game_over() {
                self.render_moves(position, engine, &mut fragment);
            }
        }

        fragment
    }

    /// Heading text: `Game over.` or `<player>: Turn <n>`.
    pub fn title(&self, position: &Position) -> String {
        if position.game_over() {
            "Game over.".to_string()
        } else {
            format!(
                "{}: Turn {}",
                self.sanitizer.sanitize(position.current_player_name()),
                position.turn_number
            )
        }
    }

    fn render_board(&self, position: &Position, fragment: &mut PositionFragment) {
        let heading = format!("<h2>{}</h2>", self.title(position));

        if !self.image_mode() {
            let cell_size = self.config.cell_sizes.for_position(position.game_over());
            fragment.html.push_str(&heading);
            fragment.html.push('\n');
            fragment.html.push_str(&position.board.html_board(cell_size));
            return;
        }

        let filename = self
            .namer
            .position_image(position.turn_number, position.current_player_name());
        if self.save_image(&filename, &position.cleared(), fragment) {
            let href = html_escape(&filename);
            let _ = writeln!(fragment.html, "<a href=\"{}\">{}</a>", href, heading);
            let _ = writeln!(fragment.html, "<p><img src=\"{}\"></p>", href);
        } else {
            fragment.html.push_str(&heading);
            fragment.html.push('\n');
        }
    }

    /// Score table rows in end-game-adjusted ranking order.
    pub fn score_table(&self, position: &Position) -> String {
        let mut html = String::from("<table cellspacing=6>\n");
        for player in position.endgame_adjusted_scores() {
            let marker = if player.id == position.current_player {
                CURRENT_PLAYER_MARKER
            } else {
                "&nbsp;"
            };
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                marker,
                self.sanitizer.sanitize(&player.name),
                self.sanitizer.sanitize(player.rack.as_str()),
                player.score
            );
        }
        html.push_str("</table>\n");
        html
    }

    fn render_moves(
        &self,
        position: &Position,
        engine: &mut (dyn EvaluationEngine + '_),
        fragment: &mut PositionFragment,
    ) {
        engine.set_position(position);
        let played = position.committed_move.as_ref();
        if let Some(played) = played {
            engine.consider_move(played);
        }

        let candidates = engine.moves(self.reconciler.limit());
        let moves = self.reconciler.reconcile(candidates, played);
        fragment.moves_listed = moves.len();

        fragment.html.push_str("<ol>\n");
        for mv in &moves {
            let mut item = self.move_item(position, mv, fragment);
            if Some(mv) == played {
                item.push_str(PLAYED_MARKER);
            }
            let _ = writeln!(fragment.html, "<li>{}</li>", item);
        }
        fragment.html.push_str("</ol>\n");
    }

    fn move_item(&self, position: &Position, mv: &Move, fragment: &mut PositionFragment) -> String {
        let description = self.sanitizer.sanitize(&mv.detailed_string());
        if !mv.is_place() {
            return description;
        }

        let preview = self
            .images
            .and_then(|_| {
                self.namer.move_image(
                    position.turn_number,
                    position.current_player_name(),
                    mv,
                )
            })
            .filter(|filename| self.save_image(filename, &position.with_move_made(mv.clone()), fragment));

        match preview {
            Some(filename) => format!(
                "<a href=\"{}\">{}</a> {}",
                html_escape(&filename),
                description,
                mv.score()
            ),
            None => format!("{} {}", description, mv.score()),
        }
    }

    /// Render and save one image; records the outcome on the fragment.
    fn save_image(&self, filename: &str, position: &Position, fragment: &mut PositionFragment) -> bool {
        let Some(images) = self.images else {
            return false;
        };

        let path = self.namer.path(filename);
        let outcome = match images.render(position, self.config.canvas) {
            Ok(bytes) => match std::fs::write(&path, &bytes) {
                Ok(()) => AssetOutcome::Written {
                    path,
                    bytes: bytes.len(),
                },
                Err(source) => AssetOutcome::Failed(ReportError::AssetWrite { path, source }),
            },
            Err(err) => AssetOutcome::Failed(err.for_asset(&path)),
        };

        let written = matches!(outcome, AssetOutcome::Written { .. });
        fragment.assets.push(RenderedAsset {
            filename: filename.to_string(),
            outcome,
        });
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSize;
    use crate::error::Result;
    use crate::sanitize::HtmlSanitizer;
    use cw_common::{Board, BoardLayout, Placement, Player, PlayerId};

    /// Engine returning a fixed list and recording what it was told.
    #[derive(Default)]
    struct ScriptedEngine {
        moves: Vec<Move>,
        positions_seen: usize,
        considered: Vec<Move>,
        requested: Option<usize>,
    }

    impl EvaluationEngine for ScriptedEngine {
        fn set_position(&mut self, _position: &Position) {
            self.positions_seen += 1;
        }

        fn consider_move(&mut self, mv: &Move) {
            self.considered.push(mv.clone());
        }

        fn moves(&mut self, count: usize) -> Vec<Move> {
            self.requested = Some(count);
            self.moves.iter().take(count).cloned().collect()
        }
    }

    struct FailingRenderer;

    impl BoardRenderer for FailingRenderer {
        fn render(&self, _position: &Position, _canvas: CanvasSize) -> Result<Vec<u8>> {
            Err(ReportError::Render("renderer offline".to_string()))
        }
    }

    fn place(tiles: &str, col: usize, score: i32) -> Move {
        Move::place(tiles, Placement::across(7, col), score)
    }

    fn position(played: Option<Move>) -> Position {
        let players = vec![
            Player::new(0, "Alice").with_rack("AEINRST").with_score(10),
            Player::new(1, "Bob").with_rack("QUACKER").with_score(50),
        ];
        let mut pos = Position::new(4, PlayerId(0), players, Board::empty(BoardLayout::standard()));
        pos.committed_move = played;
        pos
    }

    fn text_renderer<'a>(config: &'a ReportConfig, namer: &'a AssetNamer) -> PositionRenderer<'a> {
        PositionRenderer::new(config, namer, &HtmlSanitizer, None)
    }

    fn list_items(html: &str) -> Vec<String> {
        html.lines()
            .filter_map(|l| l.strip_prefix("<li>"))
            .filter_map(|l| l.strip_suffix("</li>"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_title() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);

        assert_eq!(renderer.title(&position(None)), "Alice: Turn 4");
        assert_eq!(
            renderer.title(&position(None).with_game_over(true)),
            "Game over."
        );
    }

    #[test]
    fn test_title_sanitizes_player_name() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let mut pos = position(None);
        pos.players[0].name = "<b>Al</b>".to_string();
        assert_eq!(renderer.title(&pos), "&lt;b&gt;Al&lt;/b&gt;: Turn 4");
    }

    #[test]
    fn test_score_table_follows_ranking() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let table = renderer.score_table(&position(None));

        let bob = table.find("Bob").unwrap();
        let alice = table.find("Alice").unwrap();
        assert!(bob < alice, "higher score must come first");
        assert!(table.contains("<tr><td>&rarr;</td><td>Alice</td><td>AEINRST</td><td>10</td></tr>"));
        assert!(table.contains("<tr><td>&nbsp;</td><td>Bob</td><td>QUACKER</td><td>50</td></tr>"));
    }

    #[test]
    fn test_no_engine_no_move_list() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let fragment = renderer.render(&position(Some(place("QUACK", 3, 40))), None);

        assert!(!fragment.html.contains("<ol>"));
        assert_eq!(fragment.moves_listed, 0);
        assert!(fragment.html.starts_with("<h2>Alice: Turn 4</h2>"));
    }

    #[test]
    fn test_game_over_skips_engine_and_uses_large_cells() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let mut engine = ScriptedEngine {
            moves: vec![place("A", 0, 1)],
            ..Default::default()
        };
        let pos = position(None).with_game_over(true);
        let fragment = renderer.render(&pos, Some(&mut engine));

        assert_eq!(engine.positions_seen, 0);
        assert!(!fragment.html.contains("<ol>"));
        assert!(fragment.html.starts_with("<h2>Game over.</h2>"));
        assert!(fragment.html.contains("width:45px"));
    }

    #[test]
    fn test_in_progress_uses_small_cells() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let fragment = renderer.render(&position(None), None);
        assert!(fragment.html.contains("width:25px"));
    }

    #[test]
    fn test_played_move_outside_top_five_takes_last_slot() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let played = place("ZAX", 10, 12);
        let mut engine = ScriptedEngine {
            moves: vec![
                place("QUACK", 3, 40),
                place("QUAKE", 3, 38),
                place("QUA", 3, 24),
                place("AQUA", 2, 26),
                place("QI", 7, 22),
            ],
            ..Default::default()
        };
        let fragment = renderer.render(&position(Some(played.clone())), Some(&mut engine));

        assert_eq!(engine.positions_seen, 1);
        assert_eq!(engine.considered, vec![played]);
        assert_eq!(engine.requested, Some(5));

        let items = list_items(&fragment.html);
        assert_eq!(
            items,
            vec![
                "8D QUACK 40",
                "8D QUAKE 38",
                "8D QUA 24",
                "8C AQUA 26",
                "8K ZAX 12 &nbsp;&larr;",
            ]
        );
    }

    #[test]
    fn test_played_move_in_candidates_is_marked_in_place() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let mut engine = ScriptedEngine {
            moves: vec![place("QUACK", 3, 40), Move::exchange("QU"), Move::pass()],
            ..Default::default()
        };
        let pos = position(Some(Move::exchange("QU")));
        let fragment = renderer.render(&pos, Some(&mut engine));

        let items = list_items(&fragment.html);
        assert_eq!(
            items,
            vec!["8D QUACK 40", "-QU &nbsp;&larr;", "- (pass)"]
        );
        assert_eq!(fragment.moves_listed, 3);
    }

    #[test]
    fn test_no_committed_move_skips_consider() {
        let config = ReportConfig::default();
        let namer = AssetNamer::new("/out");
        let renderer = text_renderer(&config, &namer);
        let mut engine = ScriptedEngine {
            moves: vec![place("QUACK", 3, 40)],
            ..Default::default()
        };
        let fragment = renderer.render(&position(None), Some(&mut engine));

        assert!(engine.considered.is_empty());
        assert_eq!(list_items(&fragment.html), vec!["8D QUACK 40"]);
    }

    #[test]
    fn test_image_failure_keeps_title_and_drops_links() {
        let config = ReportConfig::default().with_images(true);
        let namer = AssetNamer::new("/out");
        let renderer = PositionRenderer::new(&config, &namer, &HtmlSanitizer, Some(&FailingRenderer));
        let mut engine = ScriptedEngine {
            moves: vec![place("QUACK", 3, 40), Move::pass()],
            ..Default::default()
        };
        let fragment = renderer.render(&position(None), Some(&mut engine));

        assert!(fragment.html.starts_with("<h2>Alice: Turn 4</h2>\n"));
        assert!(!fragment.html.contains("<a href"));
        assert!(!fragment.html.contains("<img"));
        assert_eq!(list_items(&fragment.html), vec!["8D QUACK 40", "- (pass)"]);
        assert_eq!(fragment.assets.len(), 2);
        assert!(fragment.assets.iter().all(|a| !a.is_written()));
        assert_eq!(fragment.assets[0].filename, "4-Alice-position.png");
        assert_eq!(fragment.assets[1].filename, "4-Alice-QUACK-8D.png");
    }

    #[test]
    fn test_render_failure_names_the_asset_path() {
        let config = ReportConfig::default().with_images(true);
        let namer = AssetNamer::new("/out");
        let renderer = PositionRenderer::new(&config, &namer, &HtmlSanitizer, Some(&FailingRenderer));
        let fragment = renderer.render(&position(None), None);

        let AssetOutcome::Failed(err) = &fragment.assets[0].outcome else {
            panic!("expected a failed asset");
        };
        assert!(matches!(err, ReportError::AssetRender { .. }));
        assert_eq!(err.path(), Some(namer.path("4-Alice-position.png")));
        assert!(err.to_string().contains("4-Alice-position.png"));
        assert!(err.to_string().ends_with("renderer offline"));
    }
}
