use serde::Serialize;

use super::ApiClient;
use crate::error::Result;
use crate::models::calendar::BookingRequest;
use crate::models::room::ExamMachine;

/// Body of the reservation-creation endpoints. The flattened target decides
/// which surface the request goes to and which keys it carries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub exam_id: i64,
    /// UTC instant already carrying the wire compensation.
    pub start: String,
    pub end: String,
    #[serde(flatten)]
    pub target: ReservationTarget,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReservationTarget {
    #[serde(rename_all = "camelCase")]
    Internal { room_id: i64, aids: Vec<i64> },
    #[serde(rename_all = "camelCase")]
    External { room_ref: String, org_id: String },
}

impl From<&BookingRequest> for ReservationTarget {
    fn from(request: &BookingRequest) -> Self {
        match request {
            BookingRequest::Internal {
                room_id,
                accessibility_filter_ids,
            } => ReservationTarget::Internal {
                room_id: *room_id,
                aids: accessibility_filter_ids.clone(),
            },
            BookingRequest::External {
                external_room_ref,
                organisation_id,
            } => ReservationTarget::External {
                room_ref: external_room_ref.clone(),
                org_id: organisation_id.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MachineAssignment {
    machine_id: i64,
}

impl ApiClient {
    pub async fn create_reservation(&self, request: &ReservationRequest) -> Result<()> {
        let path = match request.target {
            ReservationTarget::Internal { .. } => "/calendar/reservation",
            ReservationTarget::External { .. } => "/integration/reservations/external",
        };
        self.post_json(path, request).await
    }

    pub async fn delete_reservation(&self, id: i64) -> Result<()> {
        self.delete(&format!("/calendar/reservation/{id}")).await
    }

    pub async fn delete_external_reservation(&self, external_ref: &str) -> Result<()> {
        self.delete(&format!("/integration/reservations/external/{external_ref}"))
            .await
    }

    /// Machines currently free for the reservation's time window.
    pub async fn available_machines(&self, reservation_id: i64) -> Result<Vec<ExamMachine>> {
        self.get_json(&format!("/reservations/{reservation_id}/machines"))
            .await
    }

    pub async fn reassign_machine(&self, reservation_id: i64, machine_id: i64) -> Result<()> {
        self.put_json(
            &format!("/reservations/{reservation_id}/machine"),
            &MachineAssignment { machine_id },
        )
        .await
    }
}
