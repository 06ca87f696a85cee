use super::ApiClient;
use crate::error::Result;
use crate::models::calendar::ReservationSlot;

/// A slot query for one visible calendar window. Internal queries carry
/// accessibility filters; external ones instead carry the partner
/// organisation, and never filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotQuery {
    Internal {
        exam_id: i64,
        room_id: i64,
        date: String,
        accessibility_filter_ids: Vec<i64>,
    },
    External {
        exam_id: i64,
        external_room_ref: String,
        organisation_id: String,
        date: String,
    },
}

impl ApiClient {
    pub async fn list_slots(&self, query: &SlotQuery) -> Result<Vec<ReservationSlot>> {
        match query {
            SlotQuery::Internal {
                exam_id,
                room_id,
                date,
                accessibility_filter_ids,
            } => {
                let mut params = vec![("day", date.clone())];
                for id in accessibility_filter_ids {
                    params.push(("aids", id.to_string()));
                }
                self.get_json_with(&format!("/calendar/{exam_id}/{room_id}"), &params)
                    .await
            }
            SlotQuery::External {
                exam_id,
                external_room_ref,
                organisation_id,
                date,
            } => {
                let params = vec![("day", date.clone()), ("org", organisation_id.clone())];
                self.get_json_with(
                    &format!("/integration/calendar/{exam_id}/{external_room_ref}"),
                    &params,
                )
                .await
            }
        }
    }
}
