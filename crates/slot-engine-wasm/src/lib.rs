//! WASM bindings for slot-engine.
//!
//! Exposes working-window resolution and slot recommendation to JavaScript via
//! `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use slot_engine::model::{AvailabilityInterval, AvailabilityKind, OccupiedInterval};
use slot_engine::{GapRule, ProviderSchedule, SlotRequest, WorkingHours};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Request as sent by the booking UI. Kept loosely typed so that a bad date
/// or a negative duration is reported by the engine's own validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestInput {
    provider_id: String,
    clinic_id: String,
    date: String,
    duration_minutes: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockInput {
    start_time: String,
    end_time: String,
    #[serde(default, alias = "type")]
    kind: AvailabilityKind,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentInput {
    start_time: String,
    end_time: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleInput {
    #[serde(default)]
    working_hours: WorkingHours,
    #[serde(default)]
    availability: Vec<BlockInput>,
    #[serde(default)]
    occupied: Vec<AppointmentInput>,
    #[serde(default)]
    gap_rule: Option<GapRule>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WindowDto {
    Window { start: String, end: String },
    Unavailable { error: String },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime into local civil time.
///
/// Accepts naive local time (e.g., "2025-07-09T09:00:00") and RFC 3339 with an
/// offset (e.g., "2025-07-09T09:00:00Z"), in which case the wall-clock time
/// in that offset is kept and the offset is dropped.
fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn parse_schedule_json(json: &str) -> Result<ProviderSchedule, String> {
    let input: ScheduleInput =
        serde_json::from_str(json).map_err(|e| format!("Invalid schedule JSON: {}", e))?;

    let availability = input
        .availability
        .into_iter()
        .map(|b| {
            Ok(AvailabilityInterval {
                start_time: parse_datetime(&b.start_time)?,
                end_time: parse_datetime(&b.end_time)?,
                kind: b.kind,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let occupied = input
        .occupied
        .into_iter()
        .map(|a| {
            Ok(OccupiedInterval::new(
                parse_datetime(&a.start_time)?,
                parse_datetime(&a.end_time)?,
            ))
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(ProviderSchedule {
        working_hours: input.working_hours,
        availability,
        occupied,
        gap_rule: input.gap_rule,
    })
}

fn recommend_json(request_json: &str, schedule_json: &str) -> Result<String, String> {
    let input: RequestInput =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {}", e))?;
    let request = SlotRequest::new(
        input.provider_id,
        input.clinic_id,
        &input.date,
        input.duration_minutes,
    )
    .map_err(|e| e.to_string())?;
    let schedule = parse_schedule_json(schedule_json)?;

    let result = slot_engine::recommend_slots(&request, &schedule).map_err(|e| e.to_string())?;

    serde_json::to_string(&result).map_err(|e| format!("Serialization error: {}", e))
}

fn resolve_window_json(date: &str, working_hours_json: &str) -> Result<String, String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| slot_engine::SlotError::InvalidDate(date.to_string()).to_string())?;
    let hours: WorkingHours = serde_json::from_str(working_hours_json)
        .map_err(|e| format!("Invalid working hours JSON: {}", e))?;

    let dto = match slot_engine::resolve_window(date, &hours) {
        Ok(window) => WindowDto::Window {
            start: window.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end: window.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
        },
        Err(unavailable) => WindowDto::Unavailable {
            error: unavailable.to_string(),
        },
    };

    serde_json::to_string(&dto).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Recommend up to ten bookable start times.
///
/// `request_json` is `{providerId, clinicId, date: "YYYY-MM-DD",
/// durationMinutes}`. `schedule_json` is `{workingHours, availability,
/// occupied, gapRule?}` with ISO 8601 datetimes. Returns the result as a JSON
/// string `{status, recommendedSlots, message?}`; a day without working hours
/// is a `status: "error"` result, not a thrown exception.
#[wasm_bindgen(js_name = "recommendSlots")]
pub fn recommend_slots(request_json: &str, schedule_json: &str) -> Result<String, JsValue> {
    recommend_json(request_json, schedule_json).map_err(|e| JsValue::from_str(&e))
}

/// Resolve the working window for `date` ("YYYY-MM-DD").
///
/// Returns `{start, end}` or `{error}` as a JSON string.
#[wasm_bindgen(js_name = "resolveWindow")]
pub fn resolve_window(date: &str, working_hours_json: &str) -> Result<String, JsValue> {
    resolve_window_json(date, working_hours_json).map_err(|e| JsValue::from_str(&e))
}
