//! Click-driven selection over one grid row.
//!
//! A selection is built in two clicks: the first marks an anchor, the second
//! turns the whole span between anchor and click into a selected run. A
//! click on a selected cell clears that cell and the selected tail after it;
//! clicking mid-run deliberately does not split the run.

use crate::models::{CELLS_PER_DAY, CellState, TimeGrid, Weekday};

/// Apply one click gesture to cell `index` of `day`'s row.
///
/// Panics when `index` is outside `[0, 47]`, like any slice access. No
/// state is kept between gestures other than the grid itself.
pub fn click(grid: &mut TimeGrid, day: Weekday, index: usize) {
    let row = grid.row_mut(day);
    match row[index] {
        CellState::Selected => clear_tail(row, index),
        _ => match anchor_of(row) {
            Some(anchor) => select_span(row, anchor, index),
            None => row[index] = CellState::Anchored,
        },
    }
}

/// Clear a selected tail: from `index` forward while cells stay selected.
fn clear_tail(row: &mut [CellState; CELLS_PER_DAY], index: usize) {
    for cell in row[index..].iter_mut() {
        if *cell != CellState::Selected {
            break;
        }
        *cell = CellState::Free;
    }
}

fn anchor_of(row: &[CellState; CELLS_PER_DAY]) -> Option<usize> {
    row.iter().position(|c| *c == CellState::Anchored)
}

/// Select every cell between the anchor and the clicked index, inclusive.
/// The anchor marker is absorbed into the run; anchor == index yields a
/// single-cell run.
fn select_span(row: &mut [CellState; CELLS_PER_DAY], anchor: usize, index: usize) {
    let (lo, hi) = (anchor.min(index), anchor.max(index));
    for cell in row[lo..=hi].iter_mut() {
        *cell = CellState::Selected;
    }
}
