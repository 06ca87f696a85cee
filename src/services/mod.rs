pub mod booking;
pub mod calendar;
pub mod exceptions;
pub mod rooms;

pub use booking::{ReservationBooking, SlotSelection};
pub use calendar::{AvailabilityCalendar, CalendarEvent, CalendarState};
pub use exceptions::ExceptionManager;
pub use rooms::ScheduleEditor;
