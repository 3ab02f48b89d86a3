// libs/availability-cell/src/models.rs

use chrono::{NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use shared_store::StoreError;
use shared_utils::time::weekday_ord;

/// Bounds accepted for a range's slot interval. The booking UI narrows this
/// to 15..=120; the core accepts down to 5.
pub const MIN_INTERVAL_MINUTES: u32 = 5;
pub const MAX_INTERVAL_MINUTES: u32 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityRangeRequest {
    #[serde(with = "weekday_ord")]
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub interval_minutes: u32,
}

/// Availability overview for a professional's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityStats {
    pub total_slots: usize,
    pub future_slots: usize,
    pub dates_with_availability: usize,
    pub average_slots_per_day: f64,
    pub next_available_slot: Option<NaiveDateTime>,
}

/// What a regeneration pass did to the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerationSummary {
    /// Timestamps the ranges expanded to within the window.
    pub candidates: usize,
    /// Candidates newly added to the inventory.
    pub added: usize,
    /// Candidates withheld because a live appointment already holds them.
    pub skipped_booked: usize,
    /// Stale inventory entries dropped because they lie in the past.
    pub pruned_past: usize,
    /// Inventory size after the pass.
    pub total_slots: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Professional not found")]
    ProfessionalNotFound,

    #[error("Availability range not found")]
    RangeNotFound,

    #[error("Invalid availability range: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
