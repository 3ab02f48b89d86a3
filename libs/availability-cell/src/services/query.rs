// libs/availability-cell/src/services/query.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use uuid::Uuid;

use shared_store::ProfessionalStore;
use shared_utils::Clock;

use crate::models::{AvailabilityError, AvailabilityStats};

/// Read-only projections over the slot inventory.
pub struct AvailabilityQueryService {
    professionals: Arc<dyn ProfessionalStore>,
    clock: Arc<dyn Clock>,
}

impl AvailabilityQueryService {
    pub fn new(professionals: Arc<dyn ProfessionalStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            professionals,
            clock,
        }
    }

    pub async fn stats(
        &self,
        professional_id: Uuid,
    ) -> Result<AvailabilityStats, AvailabilityError> {
        let professional = self
            .professionals
            .find_by_id(professional_id)
            .await?
            .ok_or(AvailabilityError::ProfessionalNotFound)?;

        let now = self.clock.now();
        let slots = &professional.available_time_slots;

        let future: Vec<NaiveDateTime> = slots.iter().filter(|s| **s > now).copied().collect();
        let dates_with_availability: BTreeSet<NaiveDate> =
            future.iter().map(|s| s.date()).collect();

        let average_slots_per_day = if dates_with_availability.is_empty() {
            0.0
        } else {
            let raw = future.len() as f64 / dates_with_availability.len() as f64;
            (raw * 10.0).round() / 10.0
        };

        let stats = AvailabilityStats {
            total_slots: slots.len(),
            future_slots: future.len(),
            dates_with_availability: dates_with_availability.len(),
            average_slots_per_day,
            next_available_slot: future.first().copied(),
        };
        debug!(
            "Availability stats for professional {}: {} total, {} future",
            professional_id, stats.total_slots, stats.future_slots
        );

        Ok(stats)
    }

    /// Every slot on the given calendar date, past and future alike.
    pub async fn slots_for_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<NaiveDateTime>, AvailabilityError> {
        let professional = self
            .professionals
            .find_by_id(professional_id)
            .await?
            .ok_or(AvailabilityError::ProfessionalNotFound)?;

        Ok(professional
            .available_time_slots
            .iter()
            .filter(|s| s.date() == date)
            .copied()
            .collect())
    }

    /// Slots with `start <= slot <= end`, both bounds inclusive.
    pub async fn slots_in_range(
        &self,
        professional_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>, AvailabilityError> {
        let professional = self
            .professionals
            .find_by_id(professional_id)
            .await?
            .ok_or(AvailabilityError::ProfessionalNotFound)?;

        Ok(professional
            .available_time_slots
            .range(start..=end)
            .copied()
            .collect())
    }

    /// Ids of professionals currently offering at least one future slot.
    pub async fn professionals_with_open_slots(&self) -> Result<Vec<Uuid>, AvailabilityError> {
        let now = self.clock.now();
        let professionals = self.professionals.list().await?;

        Ok(professionals
            .into_iter()
            .filter(|p| p.available_time_slots.iter().any(|s| *s > now))
            .map(|p| p.id)
            .collect())
    }
}
