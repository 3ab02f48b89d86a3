// libs/shared/models/src/professional.rs

use std::collections::BTreeSet;

use chrono::{NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_utils::time::weekday_ord;

/// A recurring weekly availability pattern. Each range carries its own id so
/// deletion targets a stable identity rather than a list position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRange {
    pub id: Uuid,
    #[serde(with = "weekday_ord")]
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub interval_minutes: u32,
}

impl AvailabilityRange {
    pub fn new(
        day_of_week: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        interval_minutes: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            day_of_week,
            start_time,
            end_time,
            interval_minutes,
        }
    }
}

/// A medical professional with their recurring availability ranges and the
/// live slot inventory. A timestamp in `available_time_slots` means "free to
/// book"; removal means booked or retracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: Uuid,
    pub user_id: Uuid,
    pub specialization: String,
    pub license_number: String,
    pub score: f64,
    pub description: Option<String>,
    pub address: Option<String>,
    pub consultation_fee: Option<f64>,
    pub availability_ranges: Vec<AvailabilityRange>,
    pub available_time_slots: BTreeSet<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Professional {
    pub fn new(
        user_id: Uuid,
        specialization: impl Into<String>,
        license_number: impl Into<String>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            specialization: specialization.into(),
            license_number: license_number.into(),
            score: 0.0,
            description: None,
            address: None,
            consultation_fee: None,
            availability_ranges: Vec::new(),
            available_time_slots: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Idempotent: re-adding a present slot is a no-op. Returns whether the
    /// slot was actually inserted.
    pub fn add_time_slot(&mut self, slot: NaiveDateTime) -> bool {
        self.available_time_slots.insert(slot)
    }

    /// Idempotent: removing an absent slot is a no-op. Returns whether the
    /// slot was actually removed.
    pub fn remove_time_slot(&mut self, slot: &NaiveDateTime) -> bool {
        self.available_time_slots.remove(slot)
    }

    pub fn has_time_slot(&self, slot: &NaiveDateTime) -> bool {
        self.available_time_slots.contains(slot)
    }

    pub fn clear_time_slots(&mut self) {
        self.available_time_slots.clear();
    }

    pub fn add_availability_range(&mut self, range: AvailabilityRange) {
        self.availability_ranges.push(range);
    }

    /// Returns whether a range with the given id existed and was removed.
    pub fn remove_availability_range(&mut self, range_id: Uuid) -> bool {
        let before = self.availability_ranges.len();
        self.availability_ranges.retain(|r| r.id != range_id);
        self.availability_ranges.len() < before
    }

    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn slot(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn professional() -> Professional {
        Professional::new(Uuid::new_v4(), "Cardiology", "LIC-1234", slot(1, 8))
    }

    #[test]
    fn re_adding_a_slot_leaves_inventory_unchanged() {
        let mut professional = professional();
        assert!(professional.add_time_slot(slot(5, 9)));
        assert!(!professional.add_time_slot(slot(5, 9)));
        assert_eq!(professional.available_time_slots.len(), 1);
    }

    #[test]
    fn removing_an_absent_slot_is_a_no_op() {
        let mut professional = professional();
        assert!(!professional.remove_time_slot(&slot(5, 9)));
        professional.add_time_slot(slot(5, 9));
        assert!(professional.remove_time_slot(&slot(5, 9)));
        assert!(!professional.has_time_slot(&slot(5, 9)));
    }

    #[test]
    fn clearing_empties_the_inventory() {
        let mut professional = professional();
        professional.add_time_slot(slot(5, 9));
        professional.add_time_slot(slot(5, 10));
        professional.clear_time_slots();
        assert!(professional.available_time_slots.is_empty());
    }

    #[test]
    fn ranges_are_removed_by_id_not_position() {
        let mut professional = professional();
        let t = |h| chrono::NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let first = AvailabilityRange::new(Weekday::Mon, t(9), t(12), 30);
        let second = AvailabilityRange::new(Weekday::Tue, t(14), t(17), 30);
        let second_id = second.id;
        professional.add_availability_range(first);
        professional.add_availability_range(second);

        assert!(professional.remove_availability_range(second_id));
        assert_eq!(professional.availability_ranges.len(), 1);
        assert_eq!(professional.availability_ranges[0].day_of_week, Weekday::Mon);
        assert!(!professional.remove_availability_range(second_id));
    }

    #[test]
    fn slots_serialize_as_iso_local_datetimes() {
        let mut professional = professional();
        professional.add_time_slot(slot(5, 9));
        let json = serde_json::to_value(&professional).unwrap();
        assert_eq!(json["availableTimeSlots"][0], "2024-06-05T09:00:00");
    }
}
