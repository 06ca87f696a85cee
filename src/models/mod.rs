pub mod calendar;
pub mod grid;
pub mod room;

pub use calendar::{ActivityWindow, BookingRequest, Enrolment, Reservation, ReservationSlot};
pub use grid::{CELLS_PER_DAY, CellState, TIME_LADDER, TimeGrid, Weekday, ladder_index};
pub use room::{
    DefaultWorkingHours, ExamMachine, ExceptionDraft, ExceptionInterval, Room, WorkingHoursBlock,
};
