use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::Result;
use crate::models::grid::Weekday;
use crate::models::room::{ExceptionDraft, ExceptionInterval, Room};

/// One block of the working-hours payload, already formatted for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireBlock {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayBlocks {
    pub weekday: Weekday,
    pub blocks: Vec<WireBlock>,
}

/// Body of `PUT /workinghours`: the full weekly schedule applied to every
/// listed room in one atomic request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursUpdate {
    pub working_hours: Vec<WeekdayBlocks>,
    pub room_ids: Vec<i64>,
}

/// Body of `PUT /exception`: one closure/override interval applied to every
/// listed room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionUpdate {
    pub room_ids: Vec<i64>,
    pub exception: ExceptionDraft,
}

#[derive(Debug, Deserialize)]
struct SettingValue {
    value: i64,
}

impl ApiClient {
    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.get_json("/rooms").await
    }

    pub async fn get_room(&self, id: i64) -> Result<Room> {
        self.get_json(&format!("/rooms/{id}")).await
    }

    pub async fn update_room(&self, room: &Room) -> Result<()> {
        self.put_json(&format!("/rooms/{}", room.id), room).await
    }

    pub async fn put_working_hours(&self, update: &WorkingHoursUpdate) -> Result<()> {
        self.put_json("/workinghours", update).await
    }

    /// Create an exception interval on every listed room; the server echoes
    /// the created intervals with ids and provenance assigned.
    pub async fn put_exception(&self, update: &ExceptionUpdate) -> Result<Vec<ExceptionInterval>> {
        self.put_json_returning("/exception", update).await
    }

    pub async fn delete_exception(&self, room_id: i64, exception_id: i64) -> Result<()> {
        self.delete(&format!("/rooms/{room_id}/exception/{exception_id}"))
            .await
    }

    /// How many days ahead of an exam's activity start reservations open.
    pub async fn reservation_window_days(&self) -> Result<i64> {
        let setting: SettingValue = self.get_json("/settings/reservationWindow").await?;
        Ok(setting.value)
    }
}
