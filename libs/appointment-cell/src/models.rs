// libs/appointment-cell/src/models.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::AppointmentStatus;
use shared_store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub time_slot: NaiveDateTime,
    pub reason: Option<String>,
}

/// Reschedule/annotate an existing appointment. An unchanged `new_time_slot`
/// only updates the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub new_time_slot: NaiveDateTime,
    pub reason: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Professional not found")]
    ProfessionalNotFound,

    #[error("This time slot was just taken")]
    SlotUnavailable,

    #[error("This time slot is already booked")]
    SlotAlreadyBooked,

    #[error("You are not authorized to modify this appointment")]
    Unauthorized,

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
