// libs/availability-cell/src/services/generator.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::AvailabilityRange;
use shared_store::{AppointmentStore, ProfessionalLocks, ProfessionalStore};
use shared_utils::time::{slot_times, window_dates};
use shared_utils::Clock;

use crate::models::{AvailabilityError, RegenerationSummary};

/// Expands recurring availability ranges into concrete future slots and folds
/// them into the professional's inventory.
pub struct SlotGeneratorService {
    professionals: Arc<dyn ProfessionalStore>,
    appointments: Arc<dyn AppointmentStore>,
    locks: Arc<ProfessionalLocks>,
    clock: Arc<dyn Clock>,
    window_days: u32,
}

impl SlotGeneratorService {
    pub fn new(
        config: &AppConfig,
        professionals: Arc<dyn ProfessionalStore>,
        appointments: Arc<dyn AppointmentStore>,
        locks: Arc<ProfessionalLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            professionals,
            appointments,
            locks,
            clock,
            window_days: config.slot_window_days,
        }
    }

    /// Pure range expansion over the inclusive window
    /// `[window_start, window_start + window_days]`.
    ///
    /// Emits one timestamp per interval step with the step strictly before the
    /// range's end time, keeps only timestamps strictly after `now`, and
    /// deduplicates by construction: overlapping ranges collapse to one slot.
    pub fn expand_ranges(
        ranges: &[AvailabilityRange],
        window_start: NaiveDate,
        window_days: u32,
        now: NaiveDateTime,
    ) -> BTreeSet<NaiveDateTime> {
        let mut slots = BTreeSet::new();
        if ranges.is_empty() {
            return slots;
        }

        for date in window_dates(window_start, window_days) {
            for range in ranges.iter().filter(|r| r.day_of_week == date.weekday()) {
                for time in slot_times(range.start_time, range.end_time, range.interval_minutes) {
                    let timestamp = date.and_time(time);
                    if timestamp > now {
                        slots.insert(timestamp);
                    }
                }
            }
        }

        slots
    }

    /// Additive regeneration under the professional's scheduling lock.
    ///
    /// Candidates held by a live appointment are withheld so regeneration can
    /// never resurrect a consumed slot, past inventory entries are pruned, and
    /// everything else is unioned in. Manually added future slots survive.
    pub async fn regenerate_slots(
        &self,
        professional_id: Uuid,
    ) -> Result<RegenerationSummary, AvailabilityError> {
        let _guard = self.locks.acquire(professional_id).await;

        let now = self.clock.now();
        let mut professional = self
            .professionals
            .find_by_id(professional_id)
            .await?
            .ok_or(AvailabilityError::ProfessionalNotFound)?;

        debug!(
            "Regenerating slots for professional {} from {} ranges",
            professional_id,
            professional.availability_ranges.len()
        );

        let window_start = now.date();
        let candidates = Self::expand_ranges(
            &professional.availability_ranges,
            window_start,
            self.window_days,
            now,
        );

        // Timestamps already consumed by a live appointment must not reappear
        // as bookable.
        let window_end = window_dates(window_start, self.window_days)
            .last()
            .copied()
            .unwrap_or(window_start)
            .and_hms_opt(23, 59, 59)
            .unwrap_or(now);
        let booked: BTreeSet<NaiveDateTime> = self
            .appointments
            .find_by_professional_between(professional_id, now, window_end)
            .await?
            .into_iter()
            .filter(|a| a.is_live())
            .map(|a| a.time_slot)
            .collect();

        let before = professional.available_time_slots.len();
        professional.available_time_slots.retain(|slot| *slot > now);
        let pruned_past = before - professional.available_time_slots.len();

        let mut added = 0;
        let mut skipped_booked = 0;
        for timestamp in &candidates {
            if booked.contains(timestamp) {
                skipped_booked += 1;
                continue;
            }
            if professional.add_time_slot(*timestamp) {
                added += 1;
            }
        }

        professional.touch(now);
        self.professionals.save(&professional).await?;

        let summary = RegenerationSummary {
            candidates: candidates.len(),
            added,
            skipped_booked,
            pruned_past,
            total_slots: professional.available_time_slots.len(),
        };
        info!(
            "Regenerated slots for professional {}: {} added, {} booked skipped, {} past pruned, {} total",
            professional_id, summary.added, summary.skipped_booked, summary.pruned_past, summary.total_slots
        );

        Ok(summary)
    }
}
