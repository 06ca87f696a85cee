//! Wire time formats and the daylight-saving compensation policy.
//!
//! The working-hours endpoint interprets submitted wall-clock strings one
//! hour off during daylight-saving time. The client compensates by adding
//! one hour when writing to the wire and subtracting it when rendering from
//! the wire. For working-hour labels the DST check runs at format time (on
//! the current instant), not at the time the label encodes. This matches
//! what the server expects and must not be changed without confirming the
//! server side.

use chrono::{DateTime, Duration, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};

use crate::error::{Error, Result};

/// Wall-clock format used by the room and working-hours endpoints.
pub const WIRE_FORMAT: &str = "%d.%m.%Y %H:%M%z";

pub fn parse_zone(zone: &str) -> Result<Tz> {
    zone.parse::<Tz>().map_err(|_| Error::Timezone(zone.to_string()))
}

/// Whether `instant` falls within the daylight-saving period of `zone`.
pub fn is_dst(instant: DateTime<Utc>, zone: Tz) -> bool {
    instant.with_timezone(&zone).offset().dst_offset() > Duration::zero()
}

/// Convert a ladder label ("H:mm") into an absolute wall-clock string on
/// today's date in `zone`, with the compensating hour added whenever `now`
/// is in DST. A label of "24:00" (or a compensated "23:30") rolls over to
/// the next day, as the server expects.
pub fn format_working_hour(label: &str, zone: Tz, now: DateTime<Utc>) -> Result<String> {
    let (hour, minute) = split_label(label)?;
    let compensation = if is_dst(now, zone) { 1 } else { 0 };

    let midnight = now
        .with_timezone(&zone)
        .date_naive()
        .and_time(NaiveTime::MIN);
    let naive = midnight + Duration::hours(hour + compensation) + Duration::minutes(minute);
    let local = match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // Spring-forward gap: the skipped hour lands right after the jump.
        LocalResult::None => zone
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| Error::bad_time(label))?,
    };
    Ok(local.format(WIRE_FORMAT).to_string())
}

/// Render-side inverse of the submit compensation: subtract the hour when
/// the instant itself is in DST.
pub fn adjust_from_wire(instant: DateTime<Utc>, zone: Tz) -> DateTime<Utc> {
    if is_dst(instant, zone) {
        instant - Duration::hours(1)
    } else {
        instant
    }
}

/// Submit-side compensation for picked calendar slots: add the hour when
/// the instant itself is in DST.
pub fn adjust_to_wire(instant: DateTime<Utc>, zone: Tz) -> DateTime<Utc> {
    if is_dst(instant, zone) {
        instant + Duration::hours(1)
    } else {
        instant
    }
}

/// Parse an instant in whichever of the server's formats it arrives:
/// RFC 3339, the wall-clock wire format, a zoneless ISO timestamp (resolved
/// in `zone`), or epoch milliseconds.
pub fn parse_wire_instant(value: &str, zone: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, WIRE_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = value.parse::<chrono::NaiveDateTime>() {
        return zone
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| Error::bad_time(value));
    }
    if let Ok(millis) = value.parse::<i64>() {
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| Error::bad_time(value));
    }
    Err(Error::bad_time(value))
}

fn split_label(label: &str) -> Result<(i64, i64)> {
    let (h, m) = label.split_once(':').ok_or_else(|| Error::bad_time(label))?;
    let hour: i64 = h.parse().map_err(|_| Error::bad_time(label))?;
    let minute: i64 = m.parse().map_err(|_| Error::bad_time(label))?;
    if !(0..=24).contains(&hour) || !(0..60).contains(&minute) {
        return Err(Error::bad_time(label));
    }
    Ok((hour, minute))
}
