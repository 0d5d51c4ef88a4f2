//! # slot-engine
//!
//! Deterministic appointment slot recommendation for clinical providers.
//!
//! Given a provider's working hours, explicit availability blocks, existing
//! appointments and a regional gap/buffer rule, the engine lists the start
//! times that can legally be booked on one day and ranks them by how little
//! they disrupt the existing schedule.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{recommend_slots, GapRule, ProviderSchedule, SlotRequest, WorkingHours};
//! use slot_engine::model::AvailabilityInterval;
//!
//! let day = chrono::NaiveDate::from_ymd_opt(2025, 7, 9).unwrap(); // a Wednesday
//! let schedule = ProviderSchedule {
//!     working_hours: WorkingHours::new().with_day("wed", "09:00", "17:00"),
//!     availability: vec![AvailabilityInterval::available(
//!         day.and_hms_opt(9, 0, 0).unwrap(),
//!         day.and_hms_opt(17, 0, 0).unwrap(),
//!     )],
//!     occupied: vec![],
//!     gap_rule: Some(GapRule::default()),
//! };
//!
//! let request = SlotRequest::new("p001", "c001", "2025-07-09", 30).unwrap();
//! let result = recommend_slots(&request, &schedule).unwrap();
//! assert!(result.is_success());
//! assert_eq!(result.recommended_slots[0], "2025-07-09T09:00:00");
//! ```
//!
//! ## Modules
//!
//! - [`window`] — weekday → working window for the requested date
//! - [`candidates`] — cursor walk producing conflict-free start times
//! - [`scoring`] — disruption score and top-N selection
//! - [`recommend`] — the end-to-end call
//! - [`model`] — input/output value types
//! - [`interval`] — half-open interval helpers
//! - [`error`] — Error types

pub mod candidates;
pub mod error;
pub mod interval;
pub mod model;
pub mod recommend;
pub mod scoring;
pub mod window;

pub use candidates::{check_slot, generate_candidates, Conflict};
pub use error::SlotError;
pub use model::{
    GapRule, ProviderSchedule, SlotRequest, SlotResult, SlotStatus, WorkingHours,
};
pub use recommend::{rank_candidates, recommend_slots};
pub use scoring::{select_top, ScoreBreakdown, SlotCandidate, MAX_RECOMMENDATIONS};
pub use window::{resolve_window, weekday_label, WindowUnavailable, WorkingWindow};
