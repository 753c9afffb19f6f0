pub mod ai;
pub mod assistant;
pub mod credentials;
pub mod intent;
pub mod media;
pub mod responses;
pub mod scheduling;
