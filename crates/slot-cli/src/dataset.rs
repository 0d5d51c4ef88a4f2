//! Clinic dataset loaded from JSON: physicians, their appointments and
//! availability blocks, and regional billing rules.
//!
//! This is the lookup layer that sits in front of the engine. It finds the
//! provider, gathers that provider's intervals for the clinic on the requested
//! day, and picks the gap rule for the region, then hands a
//! [`ProviderSchedule`] snapshot over.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Deserialize;
use slot_engine::model::{AvailabilityInterval, AvailabilityKind, OccupiedInterval};
use slot_engine::{GapRule, ProviderSchedule, WorkingHours};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub physicians: Vec<Physician>,
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
    #[serde(default)]
    pub availability_blocks: Vec<AvailabilityRecord>,
    #[serde(default)]
    pub billing_rules: Vec<BillingRule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Physician {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    pub clinic_id: String,
    #[serde(default)]
    pub working_hours: Option<WorkingHours>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub clinic_id: String,
    pub physician_code: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub clinic_id: String,
    pub physician_code: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: AvailabilityKind,
}

/// Regional gap/buffer policy. Missing or zero gaps and missing buffers fall
/// back to the engine defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRule {
    pub region: String,
    #[serde(default)]
    pub gap_duration_minutes: Option<u32>,
    #[serde(default)]
    pub before_appointment_buffer: Option<u32>,
    #[serde(default)]
    pub after_appointment_buffer: Option<u32>,
}

impl BillingRule {
    pub fn gap_rule(&self) -> GapRule {
        let defaults = GapRule::default();
        GapRule::new(
            self.gap_duration_minutes
                .filter(|gap| *gap > 0)
                .unwrap_or(defaults.gap_duration_minutes),
            self.before_appointment_buffer.unwrap_or(0),
            self.after_appointment_buffer.unwrap_or(0),
        )
    }
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse clinic dataset JSON")
    }

    /// Find a physician by business code within a clinic.
    pub fn find_physician(&self, clinic_id: &str, code: &str) -> Option<&Physician> {
        self.physicians
            .iter()
            .find(|p| p.clinic_id == clinic_id && p.code == code)
    }

    /// The gap rule for `region`, or the defaults when the region has none.
    pub fn gap_rule_for(&self, region: &str) -> GapRule {
        match self
            .billing_rules
            .iter()
            .find(|r| r.region.eq_ignore_ascii_case(region))
        {
            Some(rule) => rule.gap_rule(),
            None => {
                warn!(region, "no billing rule for region, using default gap rule");
                GapRule::default()
            }
        }
    }

    /// Gather everything the engine needs about `physician` in `clinic_id`
    /// on `date`.
    ///
    /// Only records intersecting the calendar day `[date 00:00, date+1 00:00)`
    /// are kept, so bookings on other days never influence the ranking.
    pub fn schedule_for(
        &self,
        physician: &Physician,
        clinic_id: &str,
        date: NaiveDate,
        region: &str,
    ) -> ProviderSchedule {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = day_start + TimeDelta::days(1);
        let belongs = |record_clinic: &str, record_code: &str| {
            record_clinic == clinic_id && record_code == physician.code
        };
        let on_day = |start: NaiveDateTime, end: NaiveDateTime| start < day_end && end > day_start;

        let occupied: Vec<OccupiedInterval> = self
            .appointments
            .iter()
            .filter(|a| belongs(&a.clinic_id, &a.physician_code))
            .filter(|a| on_day(a.start_time, a.end_time))
            .map(|a| OccupiedInterval::new(a.start_time, a.end_time))
            .collect();

        let availability: Vec<AvailabilityInterval> = self
            .availability_blocks
            .iter()
            .filter(|b| belongs(&b.clinic_id, &b.physician_code))
            .filter(|b| on_day(b.start_time, b.end_time))
            .map(|b| AvailabilityInterval {
                start_time: b.start_time,
                end_time: b.end_time,
                kind: b.kind,
            })
            .collect();

        debug!(
            physician = %physician.code,
            clinic = clinic_id,
            %date,
            appointments = occupied.len(),
            blocks = availability.len(),
            "collected provider schedule"
        );

        ProviderSchedule {
            working_hours: physician.working_hours.clone().unwrap_or_default(),
            availability,
            occupied,
            gap_rule: Some(self.gap_rule_for(region)),
        }
    }
}
