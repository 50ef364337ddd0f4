//! Fuzz target for rendering positions from parsed game files.
//!
//! Any position that passes validation must render to markup without
//! panicking, whatever its players, racks and moves contain.

#![no_main]

use cw_common::Game;
use cw_report::{AssetNamer, HtmlSanitizer, PositionRenderer, ReportConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(game) = Game::from_json(text) else {
        return;
    };

    let config = ReportConfig::default();
    let namer = AssetNamer::new("/nonexistent");
    let renderer = PositionRenderer::new(&config, &namer, &HtmlSanitizer, None);
    for position in game.history() {
        let fragment = renderer.render(position, None);
        assert!(fragment.assets.is_empty());
    }
});
