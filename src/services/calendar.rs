//! Availability calendar: slot loading, navigation, and display mapping.
//!
//! The calendar is a small state machine over one visible week. Each load
//! bumps a sequence number and only a response carrying the current number
//! may render, so a slow earlier response can never overwrite a newer one.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::api::{ApiClient, SlotQuery};
use crate::engine::wire;
use crate::error::Result;
use crate::models::calendar::{ActivityWindow, ReservationSlot};
use crate::models::grid::Weekday;
use crate::models::room::Room;

const AVAILABLE_COLOR: &str = "#193F19";
const RESERVED_COLOR: &str = "grey";
const OCCUPIED_COLOR: &str = "orangeRed";

/// One renderable calendar entry, times already adjusted off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub title: String,
    pub color: &'static str,
    pub available_machines: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalendarState {
    #[default]
    Idle,
    Loading,
    Rendered(Vec<CalendarEvent>),
}

pub struct AvailabilityCalendar {
    window: ActivityWindow,
    zone: Tz,
    date: DateTime<Utc>,
    epoch: u64,
    state: CalendarState,
}

impl AvailabilityCalendar {
    /// A calendar opened at the earliest permitted date.
    pub fn new(window: ActivityWindow, zone: Tz, now: DateTime<Utc>) -> Self {
        Self {
            window,
            zone,
            date: window.min_date(now),
            epoch: 0,
            state: CalendarState::Idle,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn window(&self) -> &ActivityWindow {
        &self.window
    }

    /// Enter Loading and return the sequence ticket a response must present.
    pub fn begin_loading(&mut self) -> u64 {
        self.epoch += 1;
        self.state = CalendarState::Loading;
        self.epoch
    }

    /// Render a slot response. A stale ticket is discarded without touching
    /// the state; returns whether the response was applied.
    pub fn apply(&mut self, ticket: u64, slots: &[ReservationSlot]) -> Result<bool> {
        if ticket != self.epoch {
            tracing::debug!(ticket, epoch = self.epoch, "discarding superseded slot response");
            return Ok(false);
        }
        let events = slots
            .iter()
            .map(|s| self.event_from(s))
            .collect::<Result<Vec<_>>>()?;
        self.state = CalendarState::Rendered(events);
        Ok(true)
    }

    /// Fetch and render slots for the visible date. On failure the calendar
    /// returns to Idle so the load can be re-entered.
    pub async fn refresh(&mut self, api: &ApiClient, query: &SlotQuery) -> Result<()> {
        let ticket = self.begin_loading();
        let outcome = match api.list_slots(query).await {
            Ok(slots) => self.apply(ticket, &slots).map(drop),
            Err(err) => Err(err),
        };
        if outcome.is_err() && ticket == self.epoch {
            self.state = CalendarState::Idle;
        }
        outcome
    }

    /// Move one week back, clamped to the earliest permitted date. Returns
    /// whether the visible date changed.
    pub fn previous_week(&mut self, now: DateTime<Utc>) -> bool {
        self.set_date((self.date - Duration::weeks(1)).max(self.window.min_date(now)))
    }

    /// Move one week forward, clamped to the latest permitted date.
    pub fn next_week(&mut self) -> bool {
        self.set_date((self.date + Duration::weeks(1)).min(self.window.max_date()))
    }

    /// Jump to the current date; a no-op while the exam is not yet open.
    pub fn today(&mut self, now: DateTime<Utc>) -> bool {
        if !self.can_go_today(now) {
            return false;
        }
        self.set_date(now.min(self.window.max_date()))
    }

    pub fn can_go_today(&self, now: DateTime<Utc>) -> bool {
        now >= self.window.min_date(now) && now <= self.window.max_date()
    }

    fn set_date(&mut self, date: DateTime<Utc>) -> bool {
        if date == self.date {
            return false;
        }
        self.date = date;
        true
    }

    fn event_from(&self, slot: &ReservationSlot) -> Result<CalendarEvent> {
        let start = wire::adjust_from_wire(wire::parse_wire_instant(&slot.start, self.zone)?, self.zone);
        let end = wire::adjust_from_wire(wire::parse_wire_instant(&slot.end, self.zone)?, self.zone);
        Ok(CalendarEvent {
            start,
            end,
            title: slot_title(slot),
            color: slot_color(slot),
            available_machines: slot.available_machines,
        })
    }
}

pub fn slot_title(slot: &ReservationSlot) -> String {
    if slot.available_machines > 0 {
        return format!("available ({})", slot.available_machines);
    }
    if slot.available_machines < 0 {
        return slot
            .conflicting_exam
            .clone()
            .unwrap_or_else(|| "own reservation".to_string());
    }
    "reserved".to_string()
}

pub fn slot_color(slot: &ReservationSlot) -> &'static str {
    if slot.available_machines < 0 {
        OCCUPIED_COLOR
    } else if slot.available_machines > 0 {
        AVAILABLE_COLOR
    } else {
        RESERVED_COLOR
    }
}

/// The earliest opening time over a room's weekly hours, floored to the
/// hour for display.
pub fn earliest_opening(room: &Room) -> Result<Option<NaiveTime>> {
    let times = opening_times(room, |dwh| &dwh.start_time)?;
    Ok(times
        .into_iter()
        .min()
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0)))
}

/// The latest closing time over a room's weekly hours.
pub fn latest_closing(room: &Room) -> Result<Option<NaiveTime>> {
    Ok(opening_times(room, |dwh| &dwh.end_time)?.into_iter().max())
}

/// Weekdays with no default working hours at all.
pub fn closed_weekdays(room: &Room) -> Vec<Weekday> {
    Weekday::ALL
        .into_iter()
        .filter(|day| !room.default_working_hours.iter().any(|dwh| dwh.weekday == *day))
        .collect()
}

/// Exception intervals formatted for display in the room's local zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionWindow {
    pub start: String,
    pub end: String,
    pub out_of_service: bool,
}

pub fn exception_windows(room: &Room) -> Result<Vec<ExceptionWindow>> {
    let zone = wire::parse_zone(&room.local_timezone)?;
    Ok(room
        .calendar_exception_events
        .iter()
        .map(|e| ExceptionWindow {
            start: e.start_date.with_timezone(&zone).format("%d.%m.%Y %H:%M").to_string(),
            end: e.end_date.with_timezone(&zone).format("%d.%m.%Y %H:%M").to_string(),
            out_of_service: e.out_of_service,
        })
        .collect())
}

fn opening_times<'r, F>(room: &'r Room, pick: F) -> Result<Vec<NaiveTime>>
where
    F: Fn(&'r crate::models::room::DefaultWorkingHours) -> &'r String,
{
    let zone = wire::parse_zone(&room.local_timezone)?;
    room.default_working_hours
        .iter()
        .map(|dwh| Ok(wire::parse_wire_instant(pick(dwh), zone)?.with_timezone(&zone).time()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::room::{DefaultWorkingHours, ExceptionInterval};
    use chrono::TimeZone;
    use chrono_tz::Europe::Helsinki;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, d, 12, 0, 0).unwrap()
    }

    fn window() -> ActivityWindow {
        ActivityWindow {
            exam_active_start_date: day(10),
            exam_active_end_date: day(31),
            reservation_window_days: 14,
        }
    }

    fn slot(start: &str, end: &str, machines: i32) -> ReservationSlot {
        ReservationSlot {
            start: start.into(),
            end: end.into(),
            available_machines: machines,
            conflicting_exam: None,
        }
    }

    #[test]
    fn opens_at_the_earliest_permitted_date() {
        let calendar = AvailabilityCalendar::new(window(), Helsinki, day(5));
        assert_eq!(calendar.date(), day(10));
        assert_eq!(*calendar.state(), CalendarState::Idle);
    }

    #[test]
    fn a_stale_response_is_discarded() {
        let mut calendar = AvailabilityCalendar::new(window(), Helsinki, day(12));
        let first = calendar.begin_loading();
        let second = calendar.begin_loading();

        let applied = calendar
            .apply(first, &[slot("2023-01-12T08:00:00Z", "2023-01-12T09:00:00Z", 3)])
            .unwrap();
        assert!(!applied);
        assert_eq!(*calendar.state(), CalendarState::Loading);

        let applied = calendar.apply(second, &[]).unwrap();
        assert!(applied);
        assert_eq!(*calendar.state(), CalendarState::Rendered(vec![]));
    }

    #[test]
    fn slots_map_onto_titles_and_colors_by_sign() {
        let mut calendar = AvailabilityCalendar::new(window(), Helsinki, day(12));
        let ticket_slots = [
            slot("2023-01-12T08:00:00Z", "2023-01-12T09:00:00Z", 3),
            slot("2023-01-12T09:00:00Z", "2023-01-12T10:00:00Z", 0),
            slot("2023-01-12T10:00:00Z", "2023-01-12T11:00:00Z", -1),
        ];
        let ticket = calendar.begin_loading();
        calendar.apply(ticket, &ticket_slots).unwrap();

        let CalendarState::Rendered(events) = calendar.state() else {
            panic!("expected rendered state");
        };
        assert_eq!(events[0].title, "available (3)");
        assert_eq!(events[0].color, "#193F19");
        assert_eq!(events[1].title, "reserved");
        assert_eq!(events[1].color, "grey");
        assert_eq!(events[2].title, "own reservation");
        assert_eq!(events[2].color, "orangeRed");
    }

    #[test]
    fn a_conflicting_exam_names_the_event() {
        let named = ReservationSlot {
            conflicting_exam: Some("Algebra I".into()),
            ..slot("2023-01-12T08:00:00Z", "2023-01-12T09:00:00Z", -1)
        };
        assert_eq!(slot_title(&named), "Algebra I");
    }

    #[test]
    fn rendered_times_undo_the_dst_compensation() {
        // July: Helsinki in DST, so wire instants render one hour earlier.
        let summer_window = ActivityWindow {
            exam_active_start_date: Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap(),
            exam_active_end_date: Utc.with_ymd_and_hms(2023, 7, 31, 0, 0, 0).unwrap(),
            reservation_window_days: 30,
        };
        let now = Utc.with_ymd_and_hms(2023, 7, 10, 9, 0, 0).unwrap();
        let mut calendar = AvailabilityCalendar::new(summer_window, Helsinki, now);
        let ticket = calendar.begin_loading();
        calendar
            .apply(ticket, &[slot("2023-07-12T09:00:00Z", "2023-07-12T10:00:00Z", 1)])
            .unwrap();
        let CalendarState::Rendered(events) = calendar.state() else {
            panic!("expected rendered state");
        };
        assert_eq!(events[0].start, Utc.with_ymd_and_hms(2023, 7, 12, 8, 0, 0).unwrap());
    }

    #[test]
    fn navigation_is_clamped_to_the_window() {
        let mut calendar = AvailabilityCalendar::new(window(), Helsinki, day(12));
        assert_eq!(calendar.date(), day(12));

        assert!(calendar.next_week()); // 19th
        assert!(calendar.next_week()); // clamped to the 24th
        assert_eq!(calendar.date(), day(24));
        assert!(!calendar.next_week());

        assert!(calendar.previous_week(day(12)));
        assert!(calendar.previous_week(day(12))); // clamped back to now
        assert_eq!(calendar.date(), day(12));
        assert!(!calendar.previous_week(day(12)));
    }

    #[test]
    fn today_is_disabled_before_the_exam_opens() {
        let mut calendar = AvailabilityCalendar::new(window(), Helsinki, day(5));
        assert!(!calendar.can_go_today(day(5)));
        assert!(!calendar.today(day(5)));

        assert!(calendar.next_week());
        assert!(calendar.today(day(12)));
        assert_eq!(calendar.date(), day(12));
    }

    fn display_room() -> Room {
        Room {
            id: 1,
            name: "IT-103".into(),
            local_timezone: "Europe/Helsinki".into(),
            default_working_hours: vec![
                DefaultWorkingHours {
                    id: None,
                    weekday: Weekday::Monday,
                    start_time: "2023-01-09T06:30:00Z".into(),
                    end_time: "2023-01-09T14:00:00Z".into(),
                },
                DefaultWorkingHours {
                    id: None,
                    weekday: Weekday::Wednesday,
                    start_time: "2023-01-11T08:00:00Z".into(),
                    end_time: "2023-01-11T16:00:00Z".into(),
                },
            ],
            calendar_exception_events: vec![ExceptionInterval {
                id: 1,
                start_date: Utc.with_ymd_and_hms(2023, 1, 11, 6, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2023, 1, 11, 10, 0, 0).unwrap(),
                out_of_service: true,
                mass_edited: false,
            }],
            exam_machines: vec![],
            out_of_service: false,
        }
    }

    #[test]
    fn room_display_helpers_summarize_weekly_hours() {
        let room = display_room();
        // 08:30 local floors to 08:00; latest closing is 18:00 local.
        assert_eq!(
            earliest_opening(&room).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0)
        );
        assert_eq!(
            latest_closing(&room).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0)
        );
        let closed = closed_weekdays(&room);
        assert_eq!(closed.len(), 5);
        assert!(!closed.contains(&Weekday::Monday));
        assert!(!closed.contains(&Weekday::Wednesday));
    }

    #[tokio::test]
    async fn a_malformed_slot_response_returns_the_calendar_to_idle() {
        use crate::config::ClientConfig;
        use crate::error::Error;
        use axum::Json;
        use axum::routing::get;

        let app = axum::Router::new().route(
            "/calendar/{exam}/{room}",
            get(|| async {
                Json(serde_json::json!([{
                    "start": "not a time",
                    "end": "2023-01-12T09:00:00Z",
                    "availableMachines": 2
                }]))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let api = ApiClient::new(&ClientConfig {
            base_url: format!("http://{addr}"),
            request_timeout_secs: 5,
        })
        .unwrap();

        let mut calendar = AvailabilityCalendar::new(window(), Helsinki, day(12));
        let query = SlotQuery::Internal {
            exam_id: 1,
            room_id: 4,
            date: "2023-01-12".into(),
            accessibility_filter_ids: vec![],
        };
        let err = calendar.refresh(&api, &query).await.unwrap_err();
        assert!(matches!(err, Error::Time { .. }));
        assert_eq!(*calendar.state(), CalendarState::Idle);
    }

    #[test]
    fn exception_windows_render_in_local_time() {
        let windows = exception_windows(&display_room()).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, "11.01.2023 08:00");
        assert_eq!(windows[0].end, "11.01.2023 12:00");
        assert!(windows[0].out_of_service);
    }
}
