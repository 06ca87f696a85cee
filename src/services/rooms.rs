//! Room schedule editing sessions.
//!
//! An editor holds the transient selection grid for one room (or several,
//! when mass editing) between load and submit. The grid is rebuilt from the
//! room's stored working hours on load and discarded after a successful
//! submit; a failed submit leaves it untouched.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::api::{ApiClient, WeekdayBlocks, WireBlock, WorkingHoursUpdate};
use crate::engine::{compiler, wire};
use crate::error::{Error, Result};
use crate::models::grid::{TimeGrid, Weekday};
use crate::models::room::{Room, WorkingHoursBlock};

pub struct ScheduleEditor {
    grid: TimeGrid,
    room_ids: Vec<i64>,
    zone: Tz,
}

impl ScheduleEditor {
    /// Open an editing session for one room, reconstructing the grid from
    /// its stored default working hours.
    pub fn for_room(room: &Room) -> Result<Self> {
        let zone = wire::parse_zone(&room.local_timezone)?;
        let mut grid = TimeGrid::new();
        compiler::expand(&mut grid, &stored_blocks(room, zone)?);
        Ok(Self {
            grid,
            room_ids: vec![room.id],
            zone,
        })
    }

    /// Open a mass-edit session: one empty grid applied to many rooms on
    /// submit.
    pub fn for_rooms(room_ids: Vec<i64>, zone: Tz) -> Self {
        Self {
            grid: TimeGrid::new(),
            room_ids,
            zone,
        }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn room_ids(&self) -> &[i64] {
        &self.room_ids
    }

    /// Apply one click gesture to the grid.
    pub fn click(&mut self, day: Weekday, index: usize) {
        crate::engine::gesture::click(&mut self.grid, day, index);
    }

    /// Compile the grid into the atomic `PUT /workinghours` body. An
    /// entirely free grid is rejected before any request is made.
    pub fn payload(&self, now: DateTime<Utc>) -> Result<WorkingHoursUpdate> {
        if self.grid.is_empty() {
            return Err(Error::validation("empty weekly selection"));
        }
        let mut working_hours = Vec::new();
        for (weekday, blocks) in compiler::compile_grid(&self.grid) {
            if blocks.is_empty() {
                continue;
            }
            let blocks = blocks
                .iter()
                .map(|b| {
                    Ok(WireBlock {
                        start: wire::format_working_hour(&b.start, self.zone, now)?,
                        end: wire::format_working_hour(&b.end, self.zone, now)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            working_hours.push(WeekdayBlocks { weekday, blocks });
        }
        Ok(WorkingHoursUpdate {
            working_hours,
            room_ids: self.room_ids.clone(),
        })
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<()> {
        let update = self.payload(Utc::now())?;
        api.put_working_hours(&update).await
    }
}

/// Stored working hours as ladder-label blocks, with the wire compensation
/// undone so a reloaded schedule matches what was submitted.
fn stored_blocks(room: &Room, zone: Tz) -> Result<Vec<WorkingHoursBlock>> {
    room.default_working_hours
        .iter()
        .map(|dwh| {
            Ok(WorkingHoursBlock {
                weekday: dwh.weekday,
                start: stored_label(&dwh.start_time, zone, false)?,
                end: stored_label(&dwh.end_time, zone, true)?,
            })
        })
        .collect()
}

/// A closing time on the next midnight reads back as the day-end label;
/// an opening at midnight stays "0:00".
fn stored_label(value: &str, zone: Tz, closing: bool) -> Result<String> {
    let instant = wire::adjust_from_wire(wire::parse_wire_instant(value, zone)?, zone);
    let local = instant.with_timezone(&zone);
    if closing && local.hour() == 0 && local.minute() == 0 {
        return Ok("24:00".to_string());
    }
    Ok(format!("{}:{:02}", local.hour(), local.minute()))
}
