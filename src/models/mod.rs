pub mod appointment;
pub mod credential;
pub mod history;
pub mod intent;
pub mod post;

pub use appointment::{Appointment, AppointmentStatus, Professional, SALON_TIME_SLOTS};
pub use credential::Credential;
pub use history::{EntryKind, HistoryEntry};
pub use intent::Intent;
pub use post::{Platform, PostSchedule, POST_TIME_SLOTS};
