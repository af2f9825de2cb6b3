//! Pointer geometry: mapping terminal cells to board squares and capture
//! pool slots. The same arithmetic backs both painting and hit-testing so
//! the two can never disagree.

use crate::game::Square;
use ratatui::layout::Rect;

/// Width of one board cell in terminal columns.
pub const CELL_W: u16 = 5;
/// Height of one board cell in terminal rows.
pub const CELL_H: u16 = 2;
/// Columns reserved left of the grid for rank labels.
pub const RANK_GUTTER: u16 = 3;

/// Placement of the 8x8 grid inside the board pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    origin_x: u16,
    origin_y: u16,
}

impl BoardGeometry {
    /// Computes the grid placement for a board pane.
    pub fn new(pane: Rect) -> Self {
        Self {
            origin_x: pane.x + RANK_GUTTER,
            origin_y: pane.y,
        }
    }

    /// The board square under a terminal cell, if any. Rank 8 is the top
    /// row (white plays from the bottom).
    pub fn square_at(&self, x: u16, y: u16) -> Option<Square> {
        if x < self.origin_x || y < self.origin_y {
            return None;
        }
        let file_idx = (x - self.origin_x) / CELL_W;
        let rank_idx = (y - self.origin_y) / CELL_H;
        if file_idx >= 8 || rank_idx >= 8 {
            return None;
        }
        Some(Square::new(file_idx as u8 + 1, 8 - rank_idx as u8))
    }

    /// The terminal rectangle of a board square.
    pub fn cell_rect(&self, square: Square) -> Rect {
        Rect {
            x: self.origin_x + u16::from(square.file - 1) * CELL_W,
            y: self.origin_y + u16::from(8 - square.rank) * CELL_H,
            width: CELL_W,
            height: CELL_H,
        }
    }

    /// The row for file labels, just under the grid.
    pub fn label_row(&self) -> u16 {
        self.origin_y + 8 * CELL_H
    }

    /// Grid origin, for rank labels.
    pub fn origin(&self) -> (u16, u16) {
        (self.origin_x, self.origin_y)
    }
}

/// The pool slot index under a terminal cell, given the pool's inner
/// rectangle and how many pieces it holds. Slots are two columns wide.
pub fn pool_slot_at(inner: Rect, len: usize, x: u16, y: u16) -> Option<usize> {
    if y != inner.y || x < inner.x {
        return None;
    }
    let index = ((x - inner.x) / 2) as usize;
    (index < len).then_some(index)
}
