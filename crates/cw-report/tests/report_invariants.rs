//! Report document invariant tests.
//!
//! These tests validate the generated HTML without a browser:
//! - Preamble and closing markup present exactly once
//! - One heading per position, in history order
//! - Score tables ranked by end-game-adjusted score with a single turn marker
//! - Move lists bounded and always containing the played move
//! - User-entered text escaped

use cw_common::{Board, BoardLayout, Game, Move, Placement, Player, PlayerId, Position};
use cw_report::{EvaluationEngine, ReportConfig, ReportSession};
use regex::Regex;
use tempfile::tempdir;

/// Engine that always proposes the same ranked list.
struct FixedEngine {
    moves: Vec<Move>,
}

impl EvaluationEngine for FixedEngine {
    fn set_position(&mut self, _position: &Position) {}

    fn consider_move(&mut self, _mv: &Move) {}

    fn moves(&mut self, count: usize) -> Vec<Move> {
        self.moves.iter().take(count).cloned().collect()
    }
}

fn candidates() -> Vec<Move> {
    vec![
        Move::place("QUACK", Placement::across(7, 3), 40),
        Move::place("QUAKE", Placement::across(7, 3), 38),
        Move::place("AQUA", Placement::across(7, 2), 26),
        Move::place("QUA", Placement::across(7, 3), 24),
        Move::place("QI", Placement::across(7, 7), 22),
        Move::place("KA", Placement::across(7, 7), 12),
    ]
}

fn players(alice: i32, bob: i32) -> Vec<Player> {
    vec![
        Player::new(0, "Alice").with_rack("AEINRST").with_score(alice),
        Player::new(1, "Bob").with_rack("CKQUAER").with_score(bob),
    ]
}

fn test_game() -> Game {
    let empty = Board::empty(BoardLayout::standard());
    let first = Move::place("RAINS", Placement::across(7, 5), 14);
    let after_first = empty.apply(&first).unwrap();
    let second = Move::place("ZAX", Placement::down(4, 12), 31);

    let mut game = Game::new(vec![
        Position::new(1, PlayerId(0), players(0, 0), empty).with_committed_move(first),
        Position::new(2, PlayerId(1), players(14, 0), after_first.clone())
            .with_committed_move(second),
        Position::new(3, PlayerId(0), players(14, 31), after_first).with_game_over(true),
    ]);
    game.description = Some("Club <final> & friends".to_string());
    game
}

fn render(game: &Game, engine: bool) -> String {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.html");
    let mut session = ReportSession::new(ReportConfig::new(&path)).unwrap();
    let mut fixed = FixedEngine { moves: candidates() };
    if engine {
        session.report_game(game, Some(&mut fixed));
    } else {
        session.report_game(game, None);
    }
    let summary = session.finish();
    assert!(summary.is_clean(), "diagnostics: {:?}", summary.diagnostics);
    std::fs::read_to_string(&path).unwrap()
}

// ============================================================================
// Document Structure Tests
// ============================================================================

mod structure {
    use super::*;

    #[test]
    fn test_doctype_and_closing_markup() {
        let html = render(&test_game(), false);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<body>").count(), 1);
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_generator_meta_tag() {
        let html = render(&test_game(), false);
        assert!(html.contains(r#"name="generator" content="cw-report "#));
        assert!(html.contains(r#"<meta charset="utf-8">"#));
    }

    #[test]
    fn test_board_key_written_once() {
        let html = render(&test_game(), false);
        assert_eq!(html.matches("15&times;15 board").count(), 1);
    }

    #[test]
    fn test_description_is_escaped() {
        let html = render(&test_game(), false);
        assert!(html.contains("<p>Club &lt;final&gt; &amp; friends</p>"));
        assert!(!html.contains("<final>"));
    }
}

// ============================================================================
// Heading Tests
// ============================================================================

mod headings {
    use super::*;

    #[test]
    fn test_one_heading_per_position_in_order() {
        let html = render(&test_game(), false);
        let heading = Regex::new(r"<h2>([^<]*)</h2>").expect("valid regex");
        let titles: Vec<&str> = heading
            .captures_iter(&html)
            .map(|c| c.get(1).map_or("", |m| m.as_str()))
            .collect();
        assert_eq!(titles, vec!["Alice: Turn 1", "Bob: Turn 2", "Game over."]);
    }

    #[test]
    fn test_final_board_uses_large_cells() {
        let html = render(&test_game(), false);
        let final_part = &html[html.find("Game over.").unwrap()..];
        assert!(final_part.contains("width:45px"));
        let early_part = &html[..html.find("Game over.").unwrap()];
        assert!(early_part.contains("width:25px"));
        assert!(!early_part.contains("width:45px"));
    }
}

// ============================================================================
// Score Table Tests
// ============================================================================

mod score_tables {
    use super::*;

    #[test]
    fn test_one_marker_per_table() {
        let html = render(&test_game(), false);
        let tables: Vec<&str> = html.split("<table cellspacing=6>").skip(1).collect();
        assert_eq!(tables.len(), 3);
        for table in tables {
            let table = &table[..table.find("</table>").unwrap()];
            assert_eq!(table.matches("&rarr;").count(), 1);
        }
    }

    #[test]
    fn test_rows_ranked_by_score() {
        let html = render(&test_game(), false);
        let row = Regex::new(r"<tr><td>(?:&rarr;|&nbsp;)</td><td>(\w+)</td><td>\w*</td><td>(-?\d+)</td></tr>")
            .expect("valid regex");
        let second_table = html.split("<table cellspacing=6>").nth(2).unwrap();
        let names: Vec<String> = row
            .captures_iter(second_table)
            .take(2)
            .map(|c| c[1].to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }
}

// ============================================================================
// Move List Tests
// ============================================================================

mod move_lists {
    use super::*;

    #[test]
    fn test_no_engine_no_lists() {
        let html = render(&test_game(), false);
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn test_lists_only_for_positions_in_progress() {
        let html = render(&test_game(), true);
        assert_eq!(html.matches("<ol>").count(), 2);
    }

    #[test]
    fn test_lists_bounded_with_played_move_marked() {
        let html = render(&test_game(), true);
        for list in html.split("<ol>").skip(1) {
            let list = &list[..list.find("</ol>").unwrap()];
            assert_eq!(list.matches("<li>").count(), 5);
            assert_eq!(list.matches("&nbsp;&larr;").count(), 1);
        }
        assert!(html.contains("<li>8F RAINS 14 &nbsp;&larr;</li>"));
        assert!(html.contains("<li>M5 ZAX 31 &nbsp;&larr;</li>"));
        assert!(!html.contains("8H KA 12"));
    }
}
