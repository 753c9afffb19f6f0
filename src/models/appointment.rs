use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const SALON_TIME_SLOTS: [&str; 10] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Professional {
    Ana,
    Beatriz,
    Carla,
    Daniela,
    Eduarda,
}

impl Professional {
    pub const ALL: [Professional; 5] = [
        Professional::Ana,
        Professional::Beatriz,
        Professional::Carla,
        Professional::Daniela,
        Professional::Eduarda,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Professional::Ana => "Ana",
            Professional::Beatriz => "Beatriz",
            Professional::Carla => "Carla",
            Professional::Daniela => "Daniela",
            Professional::Eduarda => "Eduarda",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: NaiveDate,
    pub professional: Professional,
    pub time_slot: String,
    pub client_name: String,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    pub fn occupies(&self, date: NaiveDate, professional: Professional) -> bool {
        self.status != AppointmentStatus::Cancelled
            && self.date == date
            && self.professional == professional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professional_parse_is_case_insensitive() {
        assert_eq!(Professional::parse("carla"), Some(Professional::Carla));
        assert_eq!(Professional::parse(" EDUARDA "), Some(Professional::Eduarda));
        assert_eq!(Professional::parse("Zoe"), None);
    }

    #[test]
    fn test_cancelled_appointment_does_not_occupy() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let mut appt = Appointment {
            id: "a1".to_string(),
            date,
            professional: Professional::Ana,
            time_slot: "10:00".to_string(),
            client_name: "Maria".to_string(),
            status: AppointmentStatus::Confirmed,
            created_at: date.and_hms_opt(8, 0, 0).unwrap(),
        };
        assert!(appt.occupies(date, Professional::Ana));
        assert!(!appt.occupies(date, Professional::Beatriz));

        appt.status = AppointmentStatus::Cancelled;
        assert!(!appt.occupies(date, Professional::Ana));
    }
}
