//! Fuzz target for game file parsing.
//!
//! Game files come from other tools and may be malformed; parsing and
//! validation must return errors, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(game) = cw_common::Game::from_json(text) else {
        return;
    };

    // A validated game must survive every derived view.
    for position in game.history() {
        let _ = position.endgame_adjusted_scores();
        if let Some(mv) = &position.committed_move {
            let _ = position.board.apply(mv);
            let _ = mv.detailed_string();
        }
    }
});
