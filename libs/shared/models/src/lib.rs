pub mod appointment;
pub mod professional;

pub use appointment::{Appointment, AppointmentStatus};
pub use professional::{AvailabilityRange, Professional};
