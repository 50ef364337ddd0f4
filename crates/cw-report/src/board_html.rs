//! Inline HTML board markup.

use crate::collaborators::BoardModel;
use crate::sanitize::html_escape;
use cw_common::{Board, Premium};
use std::fmt::Write;

const TILE_COLOR: &str = "#f3d9a4";
const BLANK_COLOR: &str = "#fbeed2";

impl BoardModel for Board {
    fn html_key(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(
            html,
            "<p>{}&times;{} board</p>",
            self.width(),
            self.height()
        );
        html.push_str("<table cellspacing=2>\n");
        for premium in self
            .layout
            .premiums_present()
            .into_iter()
            .filter(|p| *p != Premium::None)
        {
            let _ = writeln!(
                html,
                "<tr><td bgcolor=\"{}\" width=15 height=15>&nbsp;</td><td>{}</td></tr>",
                premium.css_color(),
                premium.label()
            );
        }
        html.push_str("</table>\n");
        html
    }

    fn html_board(&self, cell_size: u32) -> String {
        let font_size = (cell_size * 3 / 5).max(1);
        let cell_style = format!("width:{cell_size}px;height:{cell_size}px;font-size:{font_size}px");

        let mut html = String::new();
        html.push_str("<table cellspacing=1 cellpadding=0>\n<tr><td></td>");
        for col in 0..self.width() {
            let _ = write!(html, "<th>{}</th>", column_label(col));
        }
        html.push_str("</tr>\n");

        for row in 0..self.height() {
            let _ = write!(html, "<tr><th>{}</th>", row + 1);
            for col in 0..self.width() {
                match self.tile_at(row, col) {
                    Some(tile) => {
                        let color = if tile.is_lowercase() {
                            BLANK_COLOR
                        } else {
                            TILE_COLOR
                        };
                        let _ = write!(
                            html,
                            "<td align=center bgcolor=\"{}\" style=\"{}\"><b>{}</b></td>",
                            color,
                            cell_style,
                            html_escape(&tile.to_string())
                        );
                    }
                    None => {
                        let _ = write!(
                            html,
                            "<td bgcolor=\"{}\" style=\"{}\">&nbsp;</td>",
                            self.layout.premium_at(row, col).css_color(),
                            cell_style
                        );
                    }
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");
        html
    }
}

fn column_label(col: usize) -> char {
    u8::try_from(col)
        .ok()
        .filter(|c| *c < 26)
        .map(|c| (b'A' + c) as char)
        .unwrap_or('?')
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_common::{BoardLayout, Move, Placement};

    #[test]
    fn test_html_key_lists_present_premiums() {
        let key = Board::empty(BoardLayout::standard()).html_key();
        assert!(key.contains("15&times;15 board"));
        assert!(key.contains("Triple word score"));
        assert!(key.contains("Double letter score"));
        assert!(!key.contains("Plain square"));

        let plain = Board::empty(BoardLayout::plain(4, 4)).html_key();
        assert!(!plain.contains("score"));
    }

    #[test]
    fn test_html_board_cells() {
        let board = Board::empty(BoardLayout::plain(3, 2))
            .apply(&Move::place("Ab", Placement::across(0, 1), 1))
            .unwrap();
        let html = board.html_board(25);

        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<th>C</th>"));
        assert!(html.contains("width:25px;height:25px;font-size:15px"));
        assert!(html.contains("<b>A</b>"));
        assert!(html.contains(BLANK_COLOR));
        assert_eq!(html.matches("&nbsp;</td>").count(), 4);
    }

    #[test]
    fn test_cell_size_changes_markup() {
        let board = Board::empty(BoardLayout::plain(2, 2));
        assert!(board.html_board(45).contains("width:45px"));
        assert!(!board.html_board(45).contains("width:25px"));
    }
}
