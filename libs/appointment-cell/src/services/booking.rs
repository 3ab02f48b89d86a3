// libs/appointment-cell/src/services/booking.rs

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{Appointment, AppointmentStatus};
use shared_store::{AppointmentStore, ProfessionalLocks, ProfessionalStore};
use shared_utils::Clock;

use crate::models::{AppointmentError, BookAppointmentRequest, UpdateAppointmentRequest};
use crate::services::lifecycle::{AppointmentLifecycleRules, AppointmentLifecycleService};

/// Orchestrates appointment creation and cancellation against the slot
/// inventory, enforcing at-most-one-booking-per-slot-per-professional.
///
/// Every inventory-touching operation runs under the professional's
/// scheduling lock; this service and the slot generator are the only
/// inventory mutators.
pub struct AppointmentBookingService {
    professionals: Arc<dyn ProfessionalStore>,
    appointments: Arc<dyn AppointmentStore>,
    locks: Arc<ProfessionalLocks>,
    lifecycle: AppointmentLifecycleService,
    clock: Arc<dyn Clock>,
}

impl AppointmentBookingService {
    pub fn new(
        config: &AppConfig,
        professionals: Arc<dyn ProfessionalStore>,
        appointments: Arc<dyn AppointmentStore>,
        locks: Arc<ProfessionalLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let lifecycle = AppointmentLifecycleService::with_rules(AppointmentLifecycleRules {
            no_show_threshold_minutes: config.no_show_threshold_minutes,
        });

        Self {
            professionals,
            appointments,
            locks,
            lifecycle,
            clock,
        }
    }

    /// Book a slot for a patient.
    ///
    /// Under the professional's lock: the slot must still be in the
    /// inventory, no Scheduled appointment may already reference it, then the
    /// slot is consumed and the appointment created with the professional's
    /// current fee snapshotted.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking appointment for patient {} with professional {} at {}",
            request.patient_id, request.professional_id, request.time_slot
        );

        let _guard = self.locks.acquire(request.professional_id).await;

        let mut professional = self
            .professionals
            .find_by_id(request.professional_id)
            .await?
            .ok_or(AppointmentError::ProfessionalNotFound)?;

        if !professional.has_time_slot(&request.time_slot) {
            debug!(
                "Slot {} not in inventory for professional {}",
                request.time_slot, request.professional_id
            );
            return Err(AppointmentError::SlotUnavailable);
        }

        // Defense in depth: the inventory said free, but an appointment row
        // claiming the slot means the two collections desynced.
        if self
            .appointments
            .find_by_professional_slot_status(
                request.professional_id,
                request.time_slot,
                AppointmentStatus::Scheduled,
            )
            .await?
            .is_some()
        {
            warn!(
                "Inventory offered slot {} for professional {} but a scheduled appointment holds it",
                request.time_slot, request.professional_id
            );
            return Err(AppointmentError::SlotAlreadyBooked);
        }

        let now = self.clock.now();
        professional.remove_time_slot(&request.time_slot);
        professional.touch(now);
        self.professionals.save(&professional).await?;

        let appointment = Appointment::new(
            request.patient_id,
            &professional,
            request.time_slot,
            request.reason,
            now,
        );
        if let Err(err) = self.appointments.insert(appointment.clone()).await {
            // Put the slot back before surfacing the failure.
            professional.add_time_slot(request.time_slot);
            if let Err(restore_err) = self.professionals.save(&professional).await {
                warn!(
                    "Failed to restore slot {} for professional {} after booking failure: {}",
                    request.time_slot, request.professional_id, restore_err
                );
            }
            return Err(err.into());
        }

        info!(
            "Appointment {} booked with professional {}",
            appointment.id, request.professional_id
        );
        Ok(appointment)
    }

    /// Cancel an appointment on behalf of the booking patient and return its
    /// slot to the inventory.
    ///
    /// Only the booking patient may cancel. The slot is released first; a
    /// failed release leaves the appointment un-cancelled.
    pub async fn cancel_appointment(
        &self,
        appointment_id: Uuid,
        acting_user_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Cancelling appointment {}", appointment_id);

        let found = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        let _guard = self.locks.acquire(found.professional_id).await;

        // Re-read under the lock; the record may have moved while we waited.
        let mut appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        if appointment.patient_id != acting_user_id {
            warn!(
                "User {} attempted to cancel appointment {} they do not own",
                acting_user_id, appointment_id
            );
            return Err(AppointmentError::Unauthorized);
        }

        self.lifecycle
            .validate_status_transition(appointment.status, AppointmentStatus::Cancelled)?;

        let now = self.clock.now();
        let mut professional = self
            .professionals
            .find_by_id(appointment.professional_id)
            .await?
            .ok_or(AppointmentError::ProfessionalNotFound)?;
        professional.add_time_slot(appointment.time_slot);
        professional.touch(now);
        self.professionals.save(&professional).await?;

        appointment.set_status(AppointmentStatus::Cancelled, now);
        self.appointments.save(&appointment).await?;

        info!("Appointment {} cancelled", appointment_id);
        Ok(appointment)
    }

    /// Reschedule an appointment and/or update its reason.
    ///
    /// A changed timestamp re-runs the booking availability checks for the
    /// new slot, then swaps old for new in a single professional save so a
    /// failure midway cannot lose the old slot.
    pub async fn update_appointment(
        &self,
        appointment_id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment {}", appointment_id);

        let found = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        let _guard = self.locks.acquire(found.professional_id).await;

        let mut appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        if !appointment.can_be_cancelled() {
            return Err(AppointmentError::InvalidStatusTransition(appointment.status));
        }

        let now = self.clock.now();

        if request.new_time_slot != appointment.time_slot {
            let mut professional = self
                .professionals
                .find_by_id(appointment.professional_id)
                .await?
                .ok_or(AppointmentError::ProfessionalNotFound)?;

            if !professional.has_time_slot(&request.new_time_slot) {
                return Err(AppointmentError::SlotUnavailable);
            }
            if self
                .appointments
                .find_by_professional_slot_status(
                    appointment.professional_id,
                    request.new_time_slot,
                    AppointmentStatus::Scheduled,
                )
                .await?
                .is_some()
            {
                return Err(AppointmentError::SlotAlreadyBooked);
            }

            // Consume the new slot and release the old one in one save.
            professional.remove_time_slot(&request.new_time_slot);
            professional.add_time_slot(appointment.time_slot);
            professional.touch(now);
            self.professionals.save(&professional).await?;

            appointment.appointment_date_time = request.new_time_slot;
            appointment.time_slot = request.new_time_slot;
        }

        appointment.reason = request.reason;
        appointment.updated_at = now;
        self.appointments.save(&appointment).await?;

        info!("Appointment {} updated", appointment_id);
        Ok(appointment)
    }

    /// Professional accepts the booking: Scheduled -> Confirmed.
    pub async fn confirm_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        self.transition(appointment_id, AppointmentStatus::Confirmed)
            .await
    }

    /// Consultation happened: Confirmed -> Completed.
    pub async fn complete_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        self.transition(appointment_id, AppointmentStatus::Completed)
            .await
    }

    /// Patient never turned up: Confirmed -> NoShow, once the start time is
    /// past the no-show threshold. The slot stays consumed; it lies in the
    /// past and regeneration prunes it.
    pub async fn mark_no_show(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        let mut appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        let now = self.clock.now();
        self.lifecycle
            .validate_status_transition(appointment.status, AppointmentStatus::NoShow)?;
        if !self
            .lifecycle
            .should_mark_no_show(appointment.status, appointment.appointment_date_time, now)
        {
            return Err(AppointmentError::Validation(
                "Appointment start time has not passed the no-show threshold".to_string(),
            ));
        }

        appointment.set_status(AppointmentStatus::NoShow, now);
        self.appointments.save(&appointment).await?;

        info!("Appointment {} marked as no-show", appointment_id);
        Ok(appointment)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn appointments_for_patient(
        &self,
        patient_id: Uuid,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut appointments = self.appointments.find_by_patient(patient_id).await?;
        if let Some(status) = status {
            appointments.retain(|a| a.status == status);
        }
        Ok(appointments)
    }

    pub async fn appointments_for_professional(
        &self,
        professional_id: Uuid,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut appointments = self.appointments.find_by_professional(professional_id).await?;
        if let Some(status) = status {
            appointments.retain(|a| a.status == status);
        }
        Ok(appointments)
    }

    pub async fn appointments_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.appointments.find_between(start, end).await?)
    }

    /// Future appointments for one professional, soonest first.
    pub async fn upcoming_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let now = self.clock.now();
        let mut appointments = self
            .appointments
            .find_by_professional_between(professional_id, now, NaiveDateTime::MAX)
            .await?;
        appointments.retain(|a| a.is_live());
        Ok(appointments)
    }

    /// Future appointments for one patient, soonest first.
    pub async fn upcoming_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let now = self.clock.now();
        let mut appointments = self.appointments.find_by_patient(patient_id).await?;
        appointments.retain(|a| a.is_live() && a.appointment_date_time > now);
        Ok(appointments)
    }

    async fn transition(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let mut appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        self.lifecycle
            .validate_status_transition(appointment.status, new_status)?;

        appointment.set_status(new_status, self.clock.now());
        self.appointments.save(&appointment).await?;

        info!("Appointment {} moved to {}", appointment_id, new_status);
        Ok(appointment)
    }
}
