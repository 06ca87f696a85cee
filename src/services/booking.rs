//! Reservation creation, cancellation, and machine reassignment.
//!
//! Confirmation prompts are modeled as caller-supplied closures so the
//! service never owns dialog state. A rejected booking surfaces the server
//! message verbatim and leaves everything as it was; nothing retries.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::api::{ApiClient, ReservationRequest};
use crate::engine::wire;
use crate::error::{Error, Result};
use crate::models::calendar::{BookingRequest, Enrolment, Reservation};
use crate::models::room::ExamMachine;

/// A slot the user picked off the calendar, ready to submit.
#[derive(Debug, Clone)]
pub struct SlotSelection {
    pub exam_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub request: BookingRequest,
}

pub struct ReservationBooking<'a> {
    api: &'a ApiClient,
}

impl<'a> ReservationBooking<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Submit a picked slot to the internal or external surface, with the
    /// compensating hour added for instants in the room zone's DST period.
    pub async fn create(&self, selection: &SlotSelection, zone: Tz) -> Result<()> {
        if selection.end <= selection.start {
            return Err(Error::validation("reservation must end after it starts"));
        }
        let request = ReservationRequest {
            exam_id: selection.exam_id,
            start: wire::adjust_to_wire(selection.start, zone).to_rfc3339(),
            end: wire::adjust_to_wire(selection.end, zone).to_rfc3339(),
            target: (&selection.request).into(),
        };
        self.api.create_reservation(&request).await
    }

    /// Cancel the enrolment's reservation after the caller confirms.
    ///
    /// On a confirmed delete the local reservation reference is cleared and
    /// the cancellation flag raised for dependent views. Returns whether a
    /// cancellation happened.
    pub async fn cancel<F>(&self, enrolment: &mut Enrolment, confirm: F) -> Result<bool>
    where
        F: FnOnce(&Reservation) -> bool,
    {
        let Some(reservation) = enrolment.reservation.as_ref() else {
            return Err(Error::validation("no reservation to cancel"));
        };
        if !confirm(reservation) {
            return Ok(false);
        }
        match &reservation.external_ref {
            Some(external_ref) => self.api.delete_external_reservation(external_ref).await?,
            None => self.api.delete_reservation(reservation.id).await?,
        }
        enrolment.reservation = None;
        enrolment.reservation_canceled = true;
        Ok(true)
    }

    /// Move a reservation onto another currently-free machine. The closure
    /// picks from the machines the server offers, or `None` to back out.
    pub async fn change_machine<F>(&self, reservation: &mut Reservation, choose: F) -> Result<bool>
    where
        F: FnOnce(&[ExamMachine]) -> Option<i64>,
    {
        let machines = self.api.available_machines(reservation.id).await?;
        let Some(machine_id) = choose(&machines) else {
            return Ok(false);
        };
        let chosen = machines
            .into_iter()
            .find(|m| m.id == machine_id)
            .ok_or_else(|| Error::validation("chosen machine is not available"))?;
        self.api.reassign_machine(reservation.id, machine_id).await?;
        reservation.machine = Some(chosen);
        Ok(true)
    }
}
