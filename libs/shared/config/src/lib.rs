use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Length of the rolling forward window, in days, that slot generation
    /// expands availability ranges over.
    pub slot_window_days: u32,
    /// Minutes past the scheduled start time before a confirmed appointment
    /// may be marked as a no-show.
    pub no_show_threshold_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            slot_window_days: env::var("MEDBOOK_SLOT_WINDOW_DAYS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| {
                    warn!("MEDBOOK_SLOT_WINDOW_DAYS not set, using default of 28");
                    28
                }),
            no_show_threshold_minutes: env::var("MEDBOOK_NO_SHOW_THRESHOLD_MINUTES")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| {
                    warn!("MEDBOOK_NO_SHOW_THRESHOLD_MINUTES not set, using default of 30");
                    30
                }),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slot_window_days: 28,
            no_show_threshold_minutes: 30,
        }
    }
}
