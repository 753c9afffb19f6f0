use chrono::{NaiveDate, Utc};

use crate::models::{
    Appointment, AppointmentStatus, Platform, PostSchedule, Professional, POST_TIME_SLOTS,
    SALON_TIME_SLOTS,
};
use crate::store::{JsonStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("Informe o nome do cliente.")]
    MissingClientName,

    #[error("Informe o tipo de conteúdo.")]
    MissingContentType,

    #[error("Selecione pelo menos um horário.")]
    NoTimeSlots,

    #[error("Horário inválido: {0}")]
    UnknownSlot(String),

    #[error("O horário {time_slot} com {professional} em {date} já está ocupado.")]
    SlotTaken {
        date: NaiveDate,
        professional: &'static str,
        time_slot: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fixed salon slots not yet taken for `(date, professional)`, in slot order.
/// An exhausted day yields an empty list.
pub fn available_slots(
    appointments: &[Appointment],
    date: NaiveDate,
    professional: Professional,
) -> Vec<&'static str> {
    SALON_TIME_SLOTS
        .into_iter()
        .filter(|slot| {
            !appointments
                .iter()
                .any(|a| a.occupies(date, professional) && a.time_slot == *slot)
        })
        .collect()
}

pub struct NewAppointment {
    pub date: NaiveDate,
    pub professional: Professional,
    pub time_slot: String,
    pub client_name: String,
}

/// Validates and stores a booking. Availability is re-checked under the store
/// lock, so two submissions for the same slot cannot both land.
pub fn book_appointment(
    store: &JsonStore<Appointment>,
    request: NewAppointment,
) -> Result<Appointment, SchedulingError> {
    let client_name = request.client_name.trim().to_string();
    if client_name.is_empty() {
        return Err(SchedulingError::MissingClientName);
    }

    let time_slot = request.time_slot.trim().to_string();
    if !SALON_TIME_SLOTS.contains(&time_slot.as_str()) {
        return Err(SchedulingError::UnknownSlot(time_slot));
    }

    store.try_update(|appointments| {
        let free = available_slots(appointments, request.date, request.professional);
        if !free.contains(&time_slot.as_str()) {
            return Err(SchedulingError::SlotTaken {
                date: request.date,
                professional: request.professional.as_str(),
                time_slot: time_slot.clone(),
            });
        }

        let appointment = Appointment {
            id: uuid::Uuid::new_v4().to_string(),
            date: request.date,
            professional: request.professional,
            time_slot: time_slot.clone(),
            client_name: client_name.clone(),
            status: AppointmentStatus::Confirmed,
            created_at: Utc::now().naive_utc(),
        };
        appointments.push(appointment.clone());

        tracing::info!(
            id = %appointment.id,
            date = %appointment.date,
            professional = appointment.professional.as_str(),
            time_slot = %appointment.time_slot,
            "appointment booked"
        );

        Ok(appointment)
    })
}

pub fn cancel_appointment(
    store: &JsonStore<Appointment>,
    id: &str,
) -> Result<Appointment, SchedulingError> {
    store.try_update(|appointments| {
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SchedulingError::NotFound(format!("appointment {id}")))?;
        appointment.status = AppointmentStatus::Cancelled;
        tracing::info!(id, "appointment cancelled");
        Ok(appointment.clone())
    })
}

pub struct NewPostSchedule {
    pub platform: Platform,
    pub content_type: String,
    pub time_slots: Vec<String>,
}

pub fn schedule_post(
    store: &JsonStore<PostSchedule>,
    request: NewPostSchedule,
) -> Result<PostSchedule, SchedulingError> {
    let content_type = request.content_type.trim().to_string();
    if content_type.is_empty() {
        return Err(SchedulingError::MissingContentType);
    }

    let mut time_slots: Vec<String> = Vec::new();
    for slot in request.time_slots {
        let slot = slot.trim().to_string();
        if !POST_TIME_SLOTS.contains(&slot.as_str()) {
            return Err(SchedulingError::UnknownSlot(slot));
        }
        if !time_slots.contains(&slot) {
            time_slots.push(slot);
        }
    }
    if time_slots.is_empty() {
        return Err(SchedulingError::NoTimeSlots);
    }
    time_slots.sort_by_key(|s| POST_TIME_SLOTS.iter().position(|p| *p == s.as_str()));

    let post = PostSchedule {
        id: uuid::Uuid::new_v4().to_string(),
        created_at: Utc::now().naive_utc(),
        platform: request.platform,
        content_type,
        time_slots,
    };
    store.append(post.clone())?;

    tracing::info!(
        id = %post.id,
        platform = post.platform.as_str(),
        slots = post.time_slots.len(),
        "post scheduled"
    );

    Ok(post)
}

pub fn remove_post(store: &JsonStore<PostSchedule>, id: &str) -> Result<(), SchedulingError> {
    match store.remove_where(|p| p.id == id)? {
        0 => Err(SchedulingError::NotFound(format!("post schedule {id}"))),
        _ => Ok(()),
    }
}
