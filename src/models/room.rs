use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::grid::Weekday;

/// One contiguous open interval for a weekday, as compiled from the grid.
/// `start` and `end` are ladder labels; `start < end` and blocks for one
/// weekday never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursBlock {
    pub weekday: Weekday,
    pub start: String,
    pub end: String,
}

/// A room's stored default working hours, one row per weekday interval.
/// Start and end are server-formatted instants in the room's local zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultWorkingHours {
    #[serde(default)]
    pub id: Option<i64>,
    pub weekday: Weekday,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMachine {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub out_of_service: bool,
}

/// A one-off closure or special opening layered over default working hours.
///
/// `mass_edited` is assigned by the server when the interval was created in
/// one request against several rooms; the client only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionInterval {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub out_of_service: bool,
    #[serde(default)]
    pub mass_edited: bool,
}

/// Client-side draft of an exception interval, before the server has
/// assigned an id or provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDraft {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub out_of_service: bool,
}

impl ExceptionInterval {
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_date < end && start < self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// IANA zone the room's opening hours are anchored to, e.g. "Europe/Helsinki".
    pub local_timezone: String,
    #[serde(default)]
    pub default_working_hours: Vec<DefaultWorkingHours>,
    #[serde(default)]
    pub calendar_exception_events: Vec<ExceptionInterval>,
    #[serde(default)]
    pub exam_machines: Vec<ExamMachine>,
    #[serde(default)]
    pub out_of_service: bool,
}
