/// Pointer handling: terminal cells ↔ world units, and what a press means.

use crate::entities::RoundState;

/// World units covered by one terminal column.
pub const CELL_WIDTH: f32 = 10.0;
/// World units covered by one terminal row (cells are about twice as tall as wide).
pub const CELL_HEIGHT: f32 = 20.0;

pub const BUTTON_WIDTH: f32 = 140.0;
pub const BUTTON_HEIGHT: f32 = 50.0;
pub const BUTTON_MARGIN: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Edges are inclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// The "new round" button, anchored to the bottom-right corner.
pub fn new_round_button(width: f32, height: f32) -> Rect {
    Rect {
        x: width - BUTTON_WIDTH - BUTTON_MARGIN,
        y: height - BUTTON_HEIGHT - BUTTON_MARGIN,
        width: BUTTON_WIDTH,
        height: BUTTON_HEIGHT,
    }
}

/// Centre of a terminal cell, in world units.
pub fn cell_to_world(column: u16, row: u16) -> (f32, f32) {
    (
        (column as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

/// The cell containing a world point, or `None` when it is off screen.
pub fn world_to_cell(x: f32, y: f32, columns: u16, rows: u16) -> Option<(u16, u16)> {
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let column = (x / CELL_WIDTH) as u32;
    let row = (y / CELL_HEIGHT) as u32;
    if column >= columns as u32 || row >= rows as u32 {
        return None;
    }
    Some((column as u16, row as u16))
}

/// Playfield size in world units for a terminal of `columns × rows`.
pub fn viewport(columns: u16, rows: u16) -> (f32, f32) {
    (columns as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Fire,
    NewRound,
}

/// Decide what a press at `(x, y)` does in the current state.
///
/// Presses outside the playfield are ignored.  While the round runs any
/// press fires; once it is over only the button reacts.
pub fn resolve_press(state: &RoundState, x: f32, y: f32) -> Option<PointerAction> {
    let inside = x >= 0.0 && y >= 0.0 && x <= state.width && y <= state.height;
    if !inside {
        return None;
    }
    if !state.is_over() {
        return Some(PointerAction::Fire);
    }
    new_round_button(state.width, state.height)
        .contains(x, y)
        .then_some(PointerAction::NewRound)
}
