// libs/shared/store/src/lib.rs
//
// Persistence interface for the platform core. Records are keyed by opaque
// ids; the backing technology stays behind these traits. The in-memory
// implementations in `memory` are the default backend and the test substrate.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus, Professional};

pub mod locks;
pub mod memory;

pub use locks::ProfessionalLocks;
pub use memory::{InMemoryAppointmentStore, InMemoryProfessionalStore};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ProfessionalStore: Send + Sync {
    async fn insert(&self, professional: Professional) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professional>, StoreError>;

    /// Persist the full record. Fails with `StoreError::NotFound` for a record
    /// that was never inserted.
    async fn save(&self, professional: &Professional) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn list(&self) -> Result<Vec<Professional>, StoreError>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    async fn save(&self, appointment: &Appointment) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError>;

    async fn find_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// The booking coordinator's desync check: is there an appointment for
    /// this exact (professional, slot) pair in the given status?
    async fn find_by_professional_slot_status(
        &self,
        professional_id: Uuid,
        time_slot: NaiveDateTime,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError>;

    /// Appointments for one professional with `start <= appointment_date_time
    /// <= end`.
    async fn find_by_professional_between(
        &self,
        professional_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// All appointments with `start <= appointment_date_time <= end`.
    async fn find_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>, StoreError>;
}
