use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Platform;

/// Login metadata for a platform. The password itself is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub platform: Platform,
    pub username: String,
    pub saved_at: NaiveDateTime,
}
