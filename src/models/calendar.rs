use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::room::ExamMachine;

/// A server-computed availability window for one room.
///
/// The sign of `available_machines` is the only selectability signal:
/// positive means bookable, zero fully booked, negative occupied by the
/// requester or in conflict with another exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSlot {
    pub start: String,
    pub end: String,
    pub available_machines: i32,
    #[serde(default)]
    pub conflicting_exam: Option<String>,
}

/// The permitted date range for viewing and making reservations for an exam.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityWindow {
    pub exam_active_start_date: DateTime<Utc>,
    pub exam_active_end_date: DateTime<Utc>,
    pub reservation_window_days: i64,
}

impl ActivityWindow {
    /// Earliest permitted instant: the exam's activity start, or now if the
    /// exam is already active.
    pub fn min_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.exam_active_start_date)
    }

    /// Latest permitted instant: the reservation window measured from the
    /// activity start, clipped to the activity end.
    pub fn max_date(&self) -> DateTime<Utc> {
        let window_end = self.exam_active_start_date + Duration::days(self.reservation_window_days);
        window_end.min(self.exam_active_end_date)
    }

    pub fn contains(&self, now: DateTime<Utc>, instant: DateTime<Utc>) -> bool {
        instant >= self.min_date(now) && instant <= self.max_date()
    }
}

/// Where a booking is directed. Internal bookings target a locally owned
/// room; external ones target a partner institution's room through the
/// integration surface and carry no accessibility filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRequest {
    Internal {
        room_id: i64,
        accessibility_filter_ids: Vec<i64>,
    },
    External {
        external_room_ref: String,
        organisation_id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub external_ref: Option<String>,
    pub start_at: String,
    pub end_at: String,
    #[serde(default)]
    pub machine: Option<ExamMachine>,
}

/// The slice of an enrolment the booking flow owns: the reservation
/// reference and the flag dependent views watch after a cancellation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrolment {
    #[serde(default)]
    pub reservation: Option<Reservation>,
    #[serde(default)]
    pub reservation_canceled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
    }

    fn window() -> ActivityWindow {
        ActivityWindow {
            exam_active_start_date: day(10),
            exam_active_end_date: day(25),
            reservation_window_days: 7,
        }
    }

    #[test]
    fn min_date_is_now_once_exam_is_active() {
        let w = window();
        assert_eq!(w.min_date(day(5)), day(10));
        assert_eq!(w.min_date(day(12)), day(12));
    }

    #[test]
    fn max_date_is_clipped_by_window_and_activity_end() {
        let w = window();
        assert_eq!(w.max_date(), day(17));

        let narrow = ActivityWindow {
            reservation_window_days: 30,
            ..w
        };
        assert_eq!(narrow.max_date(), day(25));
    }

    #[test]
    fn contains_honors_both_bounds() {
        let w = window();
        assert!(w.contains(day(5), day(12)));
        assert!(!w.contains(day(5), day(8)));
        assert!(!w.contains(day(5), day(20)));
    }

    #[test]
    fn slot_deserializes_signed_machine_count() {
        let slot: ReservationSlot = serde_json::from_str(
            r#"{"start": "2024-03-11T08:00:00Z", "end": "2024-03-11T09:00:00Z", "availableMachines": -1, "conflictingExam": "Algebra I"}"#,
        )
        .unwrap();
        assert_eq!(slot.available_machines, -1);
        assert_eq!(slot.conflicting_exam.as_deref(), Some("Algebra I"));
    }
}
