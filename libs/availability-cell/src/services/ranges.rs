// libs/availability-cell/src/services/ranges.rs

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_models::AvailabilityRange;
use shared_store::ProfessionalStore;
use shared_utils::Clock;

use crate::models::{
    AvailabilityError, CreateAvailabilityRangeRequest, MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES,
};

/// CRUD over a professional's recurring availability ranges.
pub struct AvailabilityRangeService {
    professionals: Arc<dyn ProfessionalStore>,
    clock: Arc<dyn Clock>,
}

impl AvailabilityRangeService {
    pub fn new(professionals: Arc<dyn ProfessionalStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            professionals,
            clock,
        }
    }

    /// Validate and append a new range. Identical ranges may be added twice;
    /// the duplicate only produces redundant generation, never extra slots.
    pub async fn add_range(
        &self,
        professional_id: Uuid,
        request: CreateAvailabilityRangeRequest,
    ) -> Result<AvailabilityRange, AvailabilityError> {
        debug!("Creating availability range for professional {}", professional_id);

        if request.start_time >= request.end_time {
            return Err(AvailabilityError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        if request.interval_minutes < MIN_INTERVAL_MINUTES
            || request.interval_minutes > MAX_INTERVAL_MINUTES
        {
            return Err(AvailabilityError::Validation(format!(
                "Interval must be between {} and {} minutes",
                MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES
            )));
        }

        let mut professional = self
            .professionals
            .find_by_id(professional_id)
            .await?
            .ok_or(AvailabilityError::ProfessionalNotFound)?;

        let range = AvailabilityRange::new(
            request.day_of_week,
            request.start_time,
            request.end_time,
            request.interval_minutes,
        );
        professional.add_availability_range(range.clone());
        professional.touch(self.clock.now());
        self.professionals.save(&professional).await?;

        debug!(
            "Availability range {} created for professional {}",
            range.id, professional_id
        );
        Ok(range)
    }

    /// Remove a range by its id. Already-generated slots are not retracted;
    /// they age out of the inventory through regeneration.
    pub async fn remove_range(
        &self,
        professional_id: Uuid,
        range_id: Uuid,
    ) -> Result<(), AvailabilityError> {
        debug!(
            "Removing availability range {} for professional {}",
            range_id, professional_id
        );

        let mut professional = self
            .professionals
            .find_by_id(professional_id)
            .await?
            .ok_or(AvailabilityError::ProfessionalNotFound)?;

        if !professional.remove_availability_range(range_id) {
            return Err(AvailabilityError::RangeNotFound);
        }

        professional.touch(self.clock.now());
        self.professionals.save(&professional).await?;
        Ok(())
    }

    pub async fn list_ranges(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<AvailabilityRange>, AvailabilityError> {
        let professional = self
            .professionals
            .find_by_id(professional_id)
            .await?
            .ok_or(AvailabilityError::ProfessionalNotFound)?;

        Ok(professional.availability_ranges)
    }
}
