// libs/shared/store/src/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus, Professional};

use crate::{AppointmentStore, ProfessionalStore, StoreError};

#[derive(Default)]
pub struct InMemoryProfessionalStore {
    records: RwLock<HashMap<Uuid, Professional>>,
}

impl InMemoryProfessionalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfessionalStore for InMemoryProfessionalStore {
    async fn insert(&self, professional: Professional) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&professional.id) {
            return Err(StoreError::Conflict(format!(
                "professional {} already exists",
                professional.id
            )));
        }
        records.insert(professional.id, professional);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Professional>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn save(&self, professional: &Professional) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&professional.id) {
            return Err(StoreError::NotFound);
        }
        records.insert(professional.id, professional.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Professional>, StoreError> {
        let mut professionals: Vec<Professional> =
            self.records.read().await.values().cloned().collect();
        professionals.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(professionals)
    }
}

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    records: RwLock<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
        appointments.sort_by_key(|a| a.appointment_date_time);
        appointments
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn insert(&self, appointment: Appointment) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&appointment.id) {
            return Err(StoreError::Conflict(format!(
                "appointment {} already exists",
                appointment.id
            )));
        }
        records.insert(appointment.id, appointment);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn save(&self, appointment: &Appointment) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&appointment.id) {
            return Err(StoreError::NotFound);
        }
        records.insert(appointment.id, appointment.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, StoreError> {
        let records = self.records.read().await;
        Ok(Self::sorted(
            records
                .values()
                .filter(|a| a.patient_id == patient_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Appointment>, StoreError> {
        let records = self.records.read().await;
        Ok(Self::sorted(
            records
                .values()
                .filter(|a| a.professional_id == professional_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_professional_slot_status(
        &self,
        professional_id: Uuid,
        time_slot: NaiveDateTime,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|a| {
                a.professional_id == professional_id
                    && a.time_slot == time_slot
                    && a.status == status
            })
            .cloned())
    }

    async fn find_by_professional_between(
        &self,
        professional_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>, StoreError> {
        let records = self.records.read().await;
        Ok(Self::sorted(
            records
                .values()
                .filter(|a| {
                    a.professional_id == professional_id
                        && a.appointment_date_time >= start
                        && a.appointment_date_time <= end
                })
                .cloned()
                .collect(),
        ))
    }

    async fn find_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>, StoreError> {
        let records = self.records.read().await;
        Ok(Self::sorted(
            records
                .values()
                .filter(|a| a.appointment_date_time >= start && a.appointment_date_time <= end)
                .cloned()
                .collect(),
        ))
    }
}
