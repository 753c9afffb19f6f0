use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Appointment, Professional, SALON_TIME_SLOTS};
use crate::services::scheduling::{self, NewAppointment};
use crate::state::AppState;

use super::run_blocking;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Data inválida: {raw}")))
}

pub(crate) fn parse_professional(raw: &str) -> Result<Professional, AppError> {
    Professional::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("Profissional desconhecida: {raw}")))
}

// GET /api/salon/professionals
#[derive(Serialize)]
pub struct ProfessionalsResponse {
    professionals: Vec<&'static str>,
    time_slots: Vec<&'static str>,
}

pub async fn list_professionals() -> Json<ProfessionalsResponse> {
    Json(ProfessionalsResponse {
        professionals: Professional::ALL.iter().map(|p| p.as_str()).collect(),
        time_slots: SALON_TIME_SLOTS.to_vec(),
    })
}

// GET /api/salon/availability?date=&professional=
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub professional: String,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    date: NaiveDate,
    professional: Professional,
    available: Vec<&'static str>,
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(&query.date)?;
    let professional = parse_professional(&query.professional)?;
    let appointments = state.appointments.load();

    Ok(Json(AvailabilityResponse {
        date,
        professional,
        available: scheduling::available_slots(&appointments, date, professional),
    }))
}

// GET /api/salon/appointments
#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub date: Option<String>,
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let date = query.date.as_deref().map(parse_date).transpose()?;
    let mut appointments = state.appointments.load();
    if let Some(date) = date {
        appointments.retain(|a| a.date == date);
    }
    appointments.sort_by(|a, b| (a.date, &a.time_slot).cmp(&(b.date, &b.time_slot)));
    Ok(Json(appointments))
}

// POST /api/salon/appointments
#[derive(Deserialize)]
pub struct BookRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub professional: String,
    #[serde(default)]
    pub time_slot: String,
    #[serde(default)]
    pub client_name: String,
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookRequest>,
) -> Result<Json<Appointment>, AppError> {
    let request = NewAppointment {
        date: parse_date(&body.date)?,
        professional: parse_professional(&body.professional)?,
        time_slot: body.time_slot,
        client_name: body.client_name,
    };
    let appointment =
        run_blocking(move || scheduling::book_appointment(&state.appointments, request)).await??;
    Ok(Json(appointment))
}

// POST /api/salon/appointments/:id/cancel
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let appointment =
        run_blocking(move || scheduling::cancel_appointment(&state.appointments, &id)).await??;
    Ok(Json(appointment))
}
