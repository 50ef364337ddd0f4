//! Flat-colour PNG board images.
//!
//! Squares are filled with their premium colour, placed tiles with a tile
//! colour, and tiles from the move overlay with a highlight colour. No
//! glyphs are drawn.

use crate::collaborators::BoardRenderer;
use crate::config::{CanvasSize, MAX_CANVAS_SIDE};
use crate::error::{ReportError, Result};
use cw_common::{Position, PLAY_THROUGH};
use png::{BitDepth, ColorType, Encoder};
use std::collections::HashSet;
use tracing::debug;

const BACKGROUND: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const GRID: [u8; 4] = [0x55, 0x55, 0x55, 0xff];
const TILE: [u8; 4] = [0xf3, 0xd9, 0xa4, 0xff];
const BLANK_TILE: [u8; 4] = [0xfb, 0xee, 0xd2, 0xff];
const OVERLAY_TILE: [u8; 4] = [0xf5, 0xe0, 0x42, 0xff];

/// Board renderer producing PNG bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngBoardRenderer;

impl BoardRenderer for PngBoardRenderer {
    fn render(&self, position: &Position, canvas: CanvasSize) -> Result<Vec<u8>> {
        let board = position
            .board_after_overlay()
            .map_err(|e| ReportError::Render(e.to_string()))?;

        let cols = board.width() as u32;
        let rows = board.height() as u32;
        let cell = (canvas.width / cols.max(1)).min(canvas.height / rows.max(1));
        if cell < 2 {
            return Err(ReportError::Render(format!(
                "canvas {}x{} too small for a {}x{} board",
                canvas.width, canvas.height, cols, rows
            )));
        }

        let overlay = overlay_squares(position);
        let mut pixels = Pixels::new(canvas.width, canvas.height).ok_or_else(|| {
            ReportError::Render(format!(
                "canvas {}x{} is too large",
                canvas.width, canvas.height
            ))
        })?;
        let left = (canvas.width - cell * cols) / 2;
        let top = (canvas.height - cell * rows) / 2;

        for row in 0..board.height() {
            for col in 0..board.width() {
                let color = match board.tile_at(row, col) {
                    Some(_) if overlay.contains(&(row, col)) => OVERLAY_TILE,
                    Some(tile) if tile.is_lowercase() => BLANK_TILE,
                    Some(_) => TILE,
                    None => {
                        let [r, g, b] = board.layout.premium_at(row, col).rgb();
                        [r, g, b, 0xff]
                    }
                };
                let x = left + col as u32 * cell;
                let y = top + row as u32 * cell;
                pixels.fill(x, y, cell, cell, GRID);
                pixels.fill(x + 1, y + 1, cell - 1, cell - 1, color);
            }
        }

        debug!(
            turn = position.turn_number,
            width = canvas.width,
            height = canvas.height,
            cell,
            "Rendered board image"
        );

        encode_rgba_to_png_bytes(canvas.width, canvas.height, &pixels.data)
            .map_err(|e| ReportError::Render(e.to_string()))
    }
}

/// Squares newly covered by the overlay move.
fn overlay_squares(position: &Position) -> HashSet<(usize, usize)> {
    let Some(mv) = &position.move_made else {
        return HashSet::new();
    };
    let (Some(tiles), Some(placement)) = (mv.tiles(), mv.placement()) else {
        return HashSet::new();
    };
    tiles
        .chars()
        .enumerate()
        .filter(|(_, tile)| *tile != PLAY_THROUGH)
        .map(|(offset, _)| placement.square(offset))
        .collect()
}

struct Pixels {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixels {
    /// Background-filled buffer, or `None` when it would exceed
    /// `MAX_CANVAS_SIDE` on either axis.
    fn new(width: u32, height: u32) -> Option<Self> {
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return None;
        }
        let len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(BACKGROUND.len())?;
        let data = BACKGROUND.iter().copied().cycle().take(len).collect();
        Some(Self {
            width,
            height,
            data,
        })
    }

    fn fill(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]) {
        for py in y..y.saturating_add(h).min(self.height) {
            for px in x..x.saturating_add(w).min(self.width) {
                let i = (py as usize * self.width as usize + px as usize) * 4;
                self.data[i..i + 4].copy_from_slice(&color);
            }
        }
    }
}

/// RGBA -> PNG bytes.
fn encode_rgba_to_png_bytes(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> std::result::Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf)
}
