// libs/shared/models/src/appointment.rs

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::professional::Professional;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub appointment_date_time: NaiveDateTime,
    /// Redundant copy of the consumed inventory slot. Kept in lockstep with
    /// `appointment_date_time`; both move together on reschedule.
    pub time_slot: NaiveDateTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
    /// Fee snapshotted from the professional at booking time.
    pub consultation_fee: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Appointment {
    pub fn new(
        patient_id: Uuid,
        professional: &Professional,
        time_slot: NaiveDateTime,
        reason: Option<String>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            professional_id: professional.id,
            appointment_date_time: time_slot,
            time_slot,
            status: AppointmentStatus::Scheduled,
            reason,
            notes: None,
            consultation_fee: professional.consultation_fee,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_be_cancelled(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }

    pub fn can_be_modified_by(&self, user_id: Uuid) -> bool {
        self.patient_id == user_id && self.can_be_cancelled()
    }

    /// Live appointments hold their slot: the timestamp must not reappear in
    /// the professional's inventory while one exists.
    pub fn is_live(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }

    pub fn set_status(&mut self, status: AppointmentStatus, now: NaiveDateTime) {
        self.status = status;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}
