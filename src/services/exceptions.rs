//! Exception interval management over room default hours.
//!
//! Drafts come from a caller-supplied closure, keeping dialog concerns out
//! of the service. The local room lists are only mutated after the server
//! confirms a change.

use crate::api::{ApiClient, ExceptionUpdate};
use crate::error::{Error, Result};
use crate::models::room::{ExceptionDraft, ExceptionInterval, Room};

pub struct ExceptionManager<'a> {
    api: &'a ApiClient,
}

impl<'a> ExceptionManager<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Create one exception interval on every given room.
    ///
    /// The closure supplies the finished draft, or `None` when the caller
    /// backed out, which is not an error. Drafts are validated before any
    /// request: the interval must end after it starts and must not overlap
    /// an existing exception on any of the rooms. The created intervals are
    /// appended to each room's local list only on a confirmed create.
    pub async fn add<F>(&self, rooms: &mut [Room], acquire: F) -> Result<Vec<ExceptionInterval>>
    where
        F: FnOnce() -> Option<ExceptionDraft>,
    {
        let Some(draft) = acquire() else {
            return Ok(Vec::new());
        };
        if draft.end_date <= draft.start_date {
            return Err(Error::validation("exception must end after it starts"));
        }
        for room in rooms.iter() {
            let clash = room
                .calendar_exception_events
                .iter()
                .any(|e| e.overlaps(draft.start_date, draft.end_date));
            if clash {
                return Err(Error::validation(format!(
                    "exception overlaps an existing exception in {}",
                    room.name
                )));
            }
        }

        let update = ExceptionUpdate {
            room_ids: rooms.iter().map(|r| r.id).collect(),
            exception: draft,
        };
        let created = self.api.put_exception(&update).await?;
        for room in rooms.iter_mut() {
            room.calendar_exception_events.extend(created.iter().cloned());
        }
        Ok(created)
    }

    /// Delete an exception from one room; the local list is pruned only
    /// after the server confirms.
    pub async fn remove(&self, room: &mut Room, exception_id: i64) -> Result<()> {
        self.api.delete_exception(room.id, exception_id).await?;
        room.calendar_exception_events.retain(|e| e.id != exception_id);
        Ok(())
    }

    pub fn list(room: &Room) -> &[ExceptionInterval] {
        &room.calendar_exception_events
    }

    /// Exceptions created through a mass edit; the provenance flag is
    /// server-assigned and never set here.
    pub fn mass_edited(room: &Room) -> Vec<&ExceptionInterval> {
        room.calendar_exception_events.iter().filter(|e| e.mass_edited).collect()
    }

    pub fn single_room(room: &Room) -> Vec<&ExceptionInterval> {
        room.calendar_exception_events.iter().filter(|e| !e.mass_edited).collect()
    }
}
