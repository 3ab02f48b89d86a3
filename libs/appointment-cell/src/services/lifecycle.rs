// libs/appointment-cell/src/services/lifecycle.rs

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use shared_models::AppointmentStatus;

use crate::models::AppointmentError;

/// Business rules for the appointment lifecycle.
#[derive(Debug, Clone)]
pub struct AppointmentLifecycleRules {
    /// Minutes past the scheduled start before a confirmed appointment may be
    /// marked as a no-show.
    pub no_show_threshold_minutes: i64,
}

impl Default for AppointmentLifecycleRules {
    fn default() -> Self {
        Self {
            no_show_threshold_minutes: 30,
        }
    }
}

pub struct AppointmentLifecycleService {
    rules: AppointmentLifecycleRules,
}

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self {
            rules: AppointmentLifecycleRules::default(),
        }
    }

    pub fn with_rules(rules: AppointmentLifecycleRules) -> Self {
        Self { rules }
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!(
            "Validating status transition from {} to {}",
            current_status, new_status
        );

        if !self.valid_transitions(current_status).contains(&new_status) {
            warn!(
                "Invalid status transition attempted: {} -> {}",
                current_status, new_status
            );
            return Err(AppointmentError::InvalidStatusTransition(current_status));
        }

        Ok(())
    }

    /// All valid next statuses for a given current status
    pub fn valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::NoShow => vec![],
        }
    }

    /// A confirmed appointment whose start time lies more than the no-show
    /// threshold in the past is eligible for the no-show mark.
    pub fn should_mark_no_show(
        &self,
        current_status: AppointmentStatus,
        scheduled_start: NaiveDateTime,
        now: NaiveDateTime,
    ) -> bool {
        if current_status != AppointmentStatus::Confirmed {
            return false;
        }

        let threshold = scheduled_start + Duration::minutes(self.rules.no_show_threshold_minutes);
        now > threshold
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
