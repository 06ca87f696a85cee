use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Number of selectable half-hour cells in one weekday row.
pub const CELLS_PER_DAY: usize = 48;

/// Half-hour time labels from 0:00 to 24:00 inclusive, 49 entries.
/// Cell `i` covers the half-open interval `[LADDER[i], LADDER[i + 1])`.
pub static TIME_LADDER: Lazy<Vec<String>> = Lazy::new(|| {
    (0..=CELLS_PER_DAY)
        .map(|i| format!("{}:{:02}", i / 2, (i % 2) * 30))
        .collect()
});

/// Find the ladder index of a time label. Accepts both the unpadded "H:mm"
/// form the ladder itself uses and a zero-padded "HH:mm" variant.
pub fn ladder_index(label: &str) -> Option<usize> {
    let normalized = label.strip_prefix('0').filter(|s| s.len() > 3).unwrap_or(label);
    TIME_LADDER.iter().position(|t| t == normalized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Free,
    /// A pending range start with no visual block yet.
    Anchored,
    Selected,
}

impl CellState {
    pub fn is_free(self) -> bool {
        self == CellState::Free
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday-first ordinal, 1 through 7 with Sunday as 7.
    pub fn ord(self) -> u8 {
        self as u8 + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
            Weekday::Sunday => "SUNDAY",
        }
    }
}

/// The weekly opening-hours selection grid: 7 rows of 48 half-hour cells.
///
/// The grid exists only while a room's schedule is being edited; it is
/// rebuilt from the room's stored working hours on load and discarded after
/// submit. Cell indices outside `[0, 47]` panic, as with any slice index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    rows: [[CellState; CELLS_PER_DAY]; 7],
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeGrid {
    /// A fresh all-Free grid. Rows are value arrays, so every grid owns its
    /// cells outright; clones never share state.
    pub fn new() -> Self {
        Self {
            rows: [[CellState::Free; CELLS_PER_DAY]; 7],
        }
    }

    pub fn cell(&self, day: Weekday, index: usize) -> CellState {
        self.rows[day as usize][index]
    }

    pub fn set_cell(&mut self, day: Weekday, index: usize, state: CellState) {
        self.rows[day as usize][index] = state;
    }

    pub fn row(&self, day: Weekday) -> &[CellState; CELLS_PER_DAY] {
        &self.rows[day as usize]
    }

    pub fn row_mut(&mut self, day: Weekday) -> &mut [CellState; CELLS_PER_DAY] {
        &mut self.rows[day as usize]
    }

    /// True when no cell in any row is selected or anchored.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|c| c.is_free())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_has_49_labels_at_half_hour_cadence() {
        assert_eq!(TIME_LADDER.len(), 49);
        assert_eq!(TIME_LADDER[0], "0:00");
        assert_eq!(TIME_LADDER[1], "0:30");
        assert_eq!(TIME_LADDER[4], "2:00");
        assert_eq!(TIME_LADDER[9], "4:30");
        assert_eq!(TIME_LADDER[48], "24:00");
    }

    #[test]
    fn ladder_index_accepts_padded_and_unpadded_labels() {
        assert_eq!(ladder_index("0:00"), Some(0));
        assert_eq!(ladder_index("00:00"), Some(0));
        assert_eq!(ladder_index("8:30"), Some(17));
        assert_eq!(ladder_index("08:30"), Some(17));
        assert_eq!(ladder_index("24:00"), Some(48));
        assert_eq!(ladder_index("25:00"), None);
    }

    #[test]
    fn fresh_grid_is_empty_and_deep() {
        let grid = TimeGrid::new();
        assert!(grid.is_empty());

        let mut copy = grid.clone();
        copy.set_cell(Weekday::Monday, 0, CellState::Selected);
        assert!(grid.is_empty());
        assert!(!copy.is_empty());
    }

    #[test]
    fn set_cell_mutates_exactly_one_cell() {
        let mut grid = TimeGrid::new();
        grid.set_cell(Weekday::Friday, 17, CellState::Anchored);
        assert_eq!(grid.cell(Weekday::Friday, 17), CellState::Anchored);
        assert_eq!(grid.row(Weekday::Friday).iter().filter(|c| !c.is_free()).count(), 1);
        assert!(grid.row(Weekday::Thursday).iter().all(|c| c.is_free()));
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let grid = TimeGrid::new();
        let _ = grid.cell(Weekday::Monday, CELLS_PER_DAY);
    }

    #[test]
    fn weekday_ordinals_are_monday_first() {
        assert_eq!(Weekday::Monday.ord(), 1);
        assert_eq!(Weekday::Sunday.ord(), 7);
        assert_eq!(
            serde_json::to_string(&Weekday::Wednesday).unwrap(),
            "\"WEDNESDAY\""
        );
    }
}
