//! End-to-end tests for the cw binary.
//!
//! These tests run the real binary against game files in temporary
//! directories and check exit codes, stdout payloads and written reports.

use assert_cmd::Command;
use cw_common::{Board, BoardLayout, Candidate, Game, Move, Placement, Player, PlayerId, Position};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Get a Command for the cw binary with a clean environment.
fn cw() -> Command {
    let mut cmd = Command::cargo_bin("cw").expect("cw binary should exist");
    cmd.env_remove("CW_CONFIG")
        .env_remove("CW_LOG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent-cw-test-config");
    cmd
}

fn sample_game() -> Game {
    let players = |alice: i32| {
        vec![
            Player::new(0, "Alice").with_rack("AEINRST").with_score(alice),
            Player::new(1, "Bob").with_rack("CKQUAER"),
        ]
    };
    let empty = Board::empty(BoardLayout::standard());
    let first = Move::place("RAINS", Placement::across(7, 5), 14);
    let board = empty.apply(&first).unwrap();

    Game::new(vec![
        Position::new(1, PlayerId(0), players(0), empty)
            .with_committed_move(first)
            .with_analysis(vec![
                Candidate::new(Move::place("SATIRE", Placement::across(7, 4), 18), 24.5),
                Candidate::new(Move::exchange("AEI"), 3.0),
            ]),
        Position::new(2, PlayerId(1), players(14), board).with_committed_move(Move::pass()),
    ])
}

fn write_game(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("game.json");
    std::fs::write(&path, sample_game().to_json().unwrap()).unwrap();
    path
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

// ============================================================================
// Report Command Tests
// ============================================================================

mod report {
    use super::*;

    #[test]
    fn writes_single_file_report() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        let out = dir.path().join("report.html");

        cw().arg("report")
            .arg(&game)
            .arg("--output")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("2 positions"));

        let html = read(&out);
        assert!(html.contains("<h2>Alice: Turn 1</h2>"));
        assert!(html.contains("<h2>Bob: Turn 2</h2>"));
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn analysis_lists_recorded_candidates() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        let out = dir.path().join("report.html");

        cw().arg("report")
            .arg(&game)
            .args(["--analysis", "--output"])
            .arg(&out)
            .assert()
            .success();

        let html = read(&out);
        assert!(html.contains("<li>8E SATIRE 18</li>"));
        assert!(html.contains("<li>8F RAINS 14 &nbsp;&larr;</li>"));
        assert!(html.contains("<li>-AEI</li>"));
        assert!(html.contains("<li>- (pass) &nbsp;&larr;</li>"));
    }

    #[test]
    fn image_mode_writes_directory() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        let out = dir.path().join("site");

        cw().arg("report")
            .arg(&game)
            .args(["--images", "--canvas", "150", "--output"])
            .arg(&out)
            .assert()
            .success();

        assert!(out.join("index.html").is_file());
        assert!(out.join("1-Alice-position.png").is_file());
        assert!(out.join("2-Bob-position.png").is_file());
    }

    #[test]
    fn json_summary_on_stdout() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        let out = dir.path().join("report.html");

        let output = cw()
            .args(["--format", "json", "report"])
            .arg(&game)
            .arg("--output")
            .arg(&out)
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["command"], "report");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["summary"]["positions_rendered"], 2);
        assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
    }

    #[test]
    fn asset_failure_is_partial() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        let out = dir.path().join("site");
        std::fs::create_dir_all(out.join("1-Alice-position.png")).unwrap();

        cw().arg("report")
            .arg(&game)
            .args(["--images", "--output"])
            .arg(&out)
            .assert()
            .code(3)
            .stdout(predicate::str::contains("1 failed"));

        let html = read(&out.join("index.html"));
        assert!(html.contains("<h2>Alice: Turn 1</h2>"));
    }

    #[test]
    fn unopenable_output_is_partial() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);

        cw().arg("report")
            .arg(&game)
            .arg("--output")
            .arg(game.join("report.html"))
            .assert()
            .code(3);
    }

    #[test]
    fn config_file_sets_moves_to_show() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        let out = dir.path().join("report.html");
        let config = dir.path().join("cw.json");
        std::fs::write(&config, r#"{"moves_to_show": 1}"#).unwrap();

        cw().arg("--config")
            .arg(&config)
            .arg("report")
            .arg(&game)
            .args(["--analysis", "--output"])
            .arg(&out)
            .assert()
            .success();

        let html = read(&out);
        assert!(html.contains("<li>8F RAINS 14 &nbsp;&larr;</li>"));
        assert!(!html.contains("SATIRE"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn missing_game_file_is_input_error() {
        let dir = tempdir().unwrap();
        cw().arg("report")
            .arg(dir.path().join("missing.json"))
            .assert()
            .code(11);
    }

    #[test]
    fn invalid_game_file_is_input_error() {
        let dir = tempdir().unwrap();
        let game = dir.path().join("game.json");
        std::fs::write(&game, r#"{"history": []}"#).unwrap();

        cw().args(["check"])
            .arg(&game)
            .assert()
            .code(11)
            .stderr(predicate::str::contains("empty"));
    }

    #[test]
    fn unknown_command_is_args_error() {
        cw().arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn missing_config_file_is_args_error() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        cw().args(["--config", "/nonexistent/cw.json", "report"])
            .arg(&game)
            .arg("--output")
            .arg(dir.path().join("r.html"))
            .assert()
            .code(10);
    }

    #[test]
    fn zero_canvas_is_args_error() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        cw().arg("report")
            .arg(&game)
            .args(["--images", "--canvas", "0", "--output"])
            .arg(dir.path().join("site"))
            .assert()
            .code(10);
    }

    #[test]
    fn oversized_canvas_is_args_error() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);
        cw().arg("report")
            .arg(&game)
            .args(["--images", "--canvas", "4294967295", "--output"])
            .arg(dir.path().join("site"))
            .assert()
            .code(10)
            .stderr(predicate::str::contains("exceeds 4096 pixels"));
        assert!(!dir.path().join("site").exists());
    }
}

// ============================================================================
// Check / Version Tests
// ============================================================================

mod info {
    use super::*;

    #[test]
    fn check_reports_counts() {
        let dir = tempdir().unwrap();
        let game = write_game(&dir);

        let output = cw()
            .args(["--format", "json", "check"])
            .arg(&game)
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["positions"], 2);
        assert_eq!(json["players"], 2);
        assert_eq!(json["board"]["width"], 15);
        assert_eq!(json["positions_with_analysis"], 1);
    }

    #[test]
    fn version_prints_crate_version() {
        cw().arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn help_exits_clean() {
        cw().arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("report"));
    }
}
