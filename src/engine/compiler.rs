//! Grid-to-blocks compilation and its inverse.
//!
//! A weekday row compiles into the ordered list of maximal non-free runs,
//! each run becoming one `[start, end)` block of ladder labels. Expanding
//! blocks back into a row reproduces the same selected cells, so a room's
//! stored working hours can be loaded into the editor and resubmitted
//! without drift.

use crate::models::grid::{CELLS_PER_DAY, CellState, TIME_LADDER, TimeGrid, Weekday, ladder_index};
use crate::models::room::WorkingHoursBlock;

/// Compile one row into blocks, ordered by start and pairwise disjoint.
/// A run touching the last cell closes at "24:00".
pub fn compile_row(day: Weekday, row: &[CellState; CELLS_PER_DAY]) -> Vec<WorkingHoursBlock> {
    runs_of(row)
        .into_iter()
        .map(|(first, last)| WorkingHoursBlock {
            weekday: day,
            start: TIME_LADDER[first].clone(),
            end: TIME_LADDER[last + 1].clone(),
        })
        .collect()
}

/// Compile every weekday row of the grid, Monday first.
pub fn compile_grid(grid: &TimeGrid) -> Vec<(Weekday, Vec<WorkingHoursBlock>)> {
    Weekday::ALL
        .iter()
        .map(|&day| (day, compile_row(day, grid.row(day))))
        .collect()
}

/// Mark the cells a block covers as selected in its weekday's row. "0:00"
/// and "00:00" both denote the first cell. A start label matching no ladder
/// entry skips the block, as does a block that ends at or before its start;
/// an unmatched end closes at the end of the day.
pub fn expand_block(grid: &mut TimeGrid, block: &WorkingHoursBlock) {
    let Some(start) = ladder_index(&block.start) else {
        return;
    };
    let end = ladder_index(&block.end).unwrap_or(CELLS_PER_DAY).min(CELLS_PER_DAY);
    if end <= start {
        return;
    }
    let row = grid.row_mut(block.weekday);
    for cell in row[start..end].iter_mut() {
        *cell = CellState::Selected;
    }
}

pub fn expand(grid: &mut TimeGrid, blocks: &[WorkingHoursBlock]) {
    for block in blocks {
        expand_block(grid, block);
    }
}

/// Maximal runs of non-free cells as `(first, last)` inclusive index pairs.
fn runs_of(row: &[CellState; CELLS_PER_DAY]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut open: Option<usize> = None;
    for (i, cell) in row.iter().enumerate() {
        match (cell.is_free(), open) {
            (false, None) => open = Some(i),
            (true, Some(first)) => {
                runs.push((first, i - 1));
                open = None;
            }
            _ => {}
        }
    }
    if let Some(first) = open {
        runs.push((first, CELLS_PER_DAY - 1));
    }
    runs
}
