// libs/availability-cell/tests/ranges_test.rs

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use uuid::Uuid;

use availability_cell::models::{AvailabilityError, CreateAvailabilityRangeRequest};
use availability_cell::services::generator::SlotGeneratorService;
use availability_cell::services::ranges::AvailabilityRangeService;
use shared_config::AppConfig;
use shared_models::Professional;
use shared_store::{
    AppointmentStore, InMemoryAppointmentStore, InMemoryProfessionalStore, ProfessionalLocks,
    ProfessionalStore,
};
use shared_utils::FixedClock;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn request(start: NaiveTime, end: NaiveTime, interval: u32) -> CreateAvailabilityRangeRequest {
    CreateAvailabilityRangeRequest {
        day_of_week: Weekday::Mon,
        start_time: start,
        end_time: end,
        interval_minutes: interval,
    }
}

async fn setup() -> (AvailabilityRangeService, Uuid, Arc<InMemoryProfessionalStore>) {
    let professionals = Arc::new(InMemoryProfessionalStore::new());
    let professional = Professional::new(Uuid::new_v4(), "Cardiology", "LIC-300", now());
    let professional_id = professional.id;
    professionals
        .insert(professional)
        .await
        .expect("seed professional");

    let service = AvailabilityRangeService::new(
        Arc::clone(&professionals) as Arc<dyn ProfessionalStore>,
        Arc::new(FixedClock::new(now())),
    );
    (service, professional_id, professionals)
}

#[tokio::test]
async fn inverted_time_window_is_rejected() {
    let (service, professional_id, _) = setup().await;

    let err = service
        .add_range(professional_id, request(time(10, 0), time(9, 0), 30))
        .await
        .unwrap_err();
    assert_matches!(err, AvailabilityError::Validation(_));

    let err = service
        .add_range(professional_id, request(time(9, 0), time(9, 0), 30))
        .await
        .unwrap_err();
    assert_matches!(err, AvailabilityError::Validation(_));
}

#[tokio::test]
async fn interval_bounds_are_enforced() {
    let (service, professional_id, _) = setup().await;

    for bad in [0, 4, 121] {
        let err = service
            .add_range(professional_id, request(time(9, 0), time(12, 0), bad))
            .await
            .unwrap_err();
        assert_matches!(err, AvailabilityError::Validation(_));
    }

    for good in [5, 120] {
        service
            .add_range(professional_id, request(time(9, 0), time(12, 0), good))
            .await
            .expect("boundary interval accepted");
    }
}

#[tokio::test]
async fn unknown_professional_is_rejected() {
    let (service, _, _) = setup().await;

    let err = service
        .add_range(Uuid::new_v4(), request(time(9, 0), time(12, 0), 30))
        .await
        .unwrap_err();
    assert_matches!(err, AvailabilityError::ProfessionalNotFound);
}

#[tokio::test]
async fn identical_ranges_may_coexist() {
    let (service, professional_id, _) = setup().await;

    service
        .add_range(professional_id, request(time(9, 0), time(12, 0), 30))
        .await
        .expect("first range");
    service
        .add_range(professional_id, request(time(9, 0), time(12, 0), 30))
        .await
        .expect("duplicate range");

    let ranges = service.list_ranges(professional_id).await.expect("list");
    assert_eq!(ranges.len(), 2);
    assert_ne!(ranges[0].id, ranges[1].id);
}

#[tokio::test]
async fn ranges_are_removed_by_id() {
    let (service, professional_id, _) = setup().await;

    let keep = service
        .add_range(professional_id, request(time(9, 0), time(12, 0), 30))
        .await
        .expect("first range");
    let doomed = service
        .add_range(professional_id, request(time(14, 0), time(17, 0), 60))
        .await
        .expect("second range");

    service
        .remove_range(professional_id, doomed.id)
        .await
        .expect("remove by id");

    let ranges = service.list_ranges(professional_id).await.expect("list");
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].id, keep.id);

    let err = service
        .remove_range(professional_id, doomed.id)
        .await
        .unwrap_err();
    assert_matches!(err, AvailabilityError::RangeNotFound);
}

#[tokio::test]
async fn listing_is_empty_for_a_professional_without_ranges() {
    let (service, professional_id, _) = setup().await;
    let ranges = service.list_ranges(professional_id).await.expect("list");
    assert!(ranges.is_empty());
}

#[tokio::test]
async fn removing_a_range_does_not_retract_generated_slots() {
    let (service, professional_id, professionals) = setup().await;
    let appointments = Arc::new(InMemoryAppointmentStore::new());
    let generator = SlotGeneratorService::new(
        &AppConfig::default(),
        Arc::clone(&professionals) as Arc<dyn ProfessionalStore>,
        appointments as Arc<dyn AppointmentStore>,
        Arc::new(ProfessionalLocks::new()),
        Arc::new(FixedClock::new(now())),
    );

    let range = service
        .add_range(professional_id, request(time(9, 0), time(10, 0), 30))
        .await
        .expect("range");
    let summary = generator
        .regenerate_slots(professional_id)
        .await
        .expect("regenerate");
    assert!(summary.added > 0);

    service
        .remove_range(professional_id, range.id)
        .await
        .expect("remove range");

    let professional = professionals
        .find_by_id(professional_id)
        .await
        .expect("store read")
        .expect("professional exists");
    assert!(professional.availability_ranges.is_empty());
    assert_eq!(professional.available_time_slots.len(), summary.total_slots);
}
