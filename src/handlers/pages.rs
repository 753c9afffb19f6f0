use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::{NaiveDate, Utc};
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Platform, Professional, POST_TIME_SLOTS, SALON_TIME_SLOTS};
use crate::services::assistant::{self, SessionContext};
use crate::services::credentials;
use crate::services::scheduling::{self, NewAppointment, NewPostSchedule};
use crate::state::AppState;

use super::posts::parse_platform;
use super::run_blocking;
use super::salon::{parse_date, parse_professional};

static APP_TEMPLATE: &str = include_str!("../web/app.html");

const CHAT_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    History,
    Salon,
    Posts,
    Credentials,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Chat,
        View::History,
        View::Salon,
        View::Posts,
        View::Credentials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Chat => "chat",
            View::History => "history",
            View::Salon => "salon",
            View::Posts => "posts",
            View::Credentials => "credentials",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Chat => "💬 Chat",
            View::History => "📜 Histórico",
            View::Salon => "💇 Agenda do Salão",
            View::Posts => "📅 Agendador de Postagens",
            View::Credentials => "🔐 Credenciais",
        }
    }

    /// Unknown or missing selections fall back to the chat view.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("history") => View::History,
            Some("salon") => View::Salon,
            Some("posts") => View::Posts,
            Some("credentials") => View::Credentials,
            _ => View::Chat,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub view: Option<String>,
    pub date: Option<String>,
    pub professional: Option<String>,
}

#[derive(Serialize)]
struct NavItem {
    key: &'static str,
    label: &'static str,
}

// GET /app
pub async fn app_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let view = View::parse(query.view.as_deref());
    render_view(&state, view, &query, None)
}

pub async fn redirect_to_app() -> Redirect {
    Redirect::to("/app")
}

fn render_view(
    state: &AppState,
    view: View,
    query: &PageQuery,
    warning: Option<String>,
) -> Result<Html<String>, AppError> {
    let nav: Vec<NavItem> = View::ALL
        .iter()
        .map(|v| NavItem {
            key: v.as_str(),
            label: v.label(),
        })
        .collect();

    let body = match view {
        View::Chat => {
            let session = SessionContext::load(&state.history);
            let mut entries = session.recent(CHAT_WINDOW);
            entries.reverse();
            context! {
                entries => entries,
                model_enabled => state.llm.is_some(),
            }
        }
        View::History => {
            let session = SessionContext::load(&state.history);
            let total = session.history.len();
            context! {
                entries => session.recent(usize::MAX),
                total => total,
            }
        }
        View::Salon => {
            // A bad date/professional in the URL just falls back to the defaults.
            let date = query
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .unwrap_or_else(|| Utc::now().date_naive());
            let professional = query
                .professional
                .as_deref()
                .and_then(Professional::parse)
                .unwrap_or(Professional::Ana);

            let appointments = state.appointments.load();
            let available = scheduling::available_slots(&appointments, date, professional);
            let mut booked: Vec<_> = appointments.into_iter().filter(|a| a.date == date).collect();
            booked.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));

            context! {
                date => date.format("%Y-%m-%d").to_string(),
                professional => professional.as_str(),
                professionals => Professional::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                available => available,
                all_slots_count => SALON_TIME_SLOTS.len(),
                booked => booked,
            }
        }
        View::Posts => {
            let mut posts = state.posts.load();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            context! {
                platforms => Platform::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                time_slots => POST_TIME_SLOTS.to_vec(),
                posts => posts,
            }
        }
        View::Credentials => context! {
            platforms => Platform::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            credentials => credentials::list_credentials(&state.credentials),
        },
    };

    let mut env = Environment::new();
    env.add_template("app.html", APP_TEMPLATE)?;
    let html = env.get_template("app.html")?.render(context! {
        view => view.as_str(),
        nav => nav,
        warning => warning,
        ..body
    })?;

    Ok(Html(html))
}

fn rerender_with_warning(state: &AppState, view: View, query: PageQuery, err: AppError) -> Response {
    match err {
        AppError::Validation(msg) | AppError::Conflict(msg) => {
            tracing::debug!(view = view.as_str(), warning = %msg, "form rejected");
            match render_view(state, view, &query, Some(msg)) {
                Ok(html) => html.into_response(),
                Err(e) => e.into_response(),
            }
        }
        other => other.into_response(),
    }
}

// POST /app/chat
#[derive(Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

pub async fn chat_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChatForm>,
) -> Response {
    if form.message.trim().is_empty() {
        return rerender_with_warning(
            &state,
            View::Chat,
            PageQuery::default(),
            AppError::Validation("Digite uma mensagem.".to_string()),
        );
    }

    let mut ctx = SessionContext::load(&state.history);
    match assistant::process_message(&state, &mut ctx, &form.message).await {
        Ok(_) => Redirect::to("/app?view=chat").into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

// POST /app/history/:id/delete
pub async fn history_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let target = id.clone();
    let result = run_blocking(move || state.history.remove_where(|e| e.id == target)).await;
    match result.and_then(|r| r.map_err(AppError::from)) {
        Ok(removed) => {
            tracing::info!(id = %id, removed, "history entry removed");
            Redirect::to("/app?view=history").into_response()
        }
        Err(e) => e.into_response(),
    }
}

// POST /app/salon
#[derive(Deserialize)]
pub struct SalonForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub professional: String,
    #[serde(default)]
    pub time_slot: String,
    #[serde(default)]
    pub client_name: String,
}

pub async fn salon_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SalonForm>,
) -> Response {
    let query = PageQuery {
        view: None,
        date: Some(form.date.clone()),
        professional: Some(form.professional.clone()),
    };

    let st = state.clone();
    let result = run_blocking(move || -> Result<_, AppError> {
        let request = NewAppointment {
            date: parse_date(&form.date)?,
            professional: parse_professional(&form.professional)?,
            time_slot: form.time_slot,
            client_name: form.client_name,
        };
        Ok(scheduling::book_appointment(&st.appointments, request)?)
    })
    .await
    .and_then(|r| r);

    match result {
        Ok(appointment) => Redirect::to(&format!(
            "/app?view=salon&date={}&professional={}",
            appointment.date.format("%Y-%m-%d"),
            appointment.professional.as_str()
        ))
        .into_response(),
        Err(e) => rerender_with_warning(&state, View::Salon, query, e),
    }
}

// POST /app/posts
//
// Checkbox groups repeat the `time_slots` key, so the form is read as raw pairs.
pub async fn posts_submit(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let field = |name: &str| {
        fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    };
    let time_slots: Vec<String> = fields
        .iter()
        .filter(|(k, _)| k == "time_slots")
        .map(|(_, v)| v.clone())
        .collect();

    let request = parse_platform(&field("platform")).map(|platform| NewPostSchedule {
        platform,
        content_type: field("content_type"),
        time_slots,
    });
    let st = state.clone();
    let result = match request {
        Ok(request) => run_blocking(move || scheduling::schedule_post(&st.posts, request))
            .await
            .and_then(|r| r.map_err(AppError::from)),
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Redirect::to("/app?view=posts").into_response(),
        Err(e) => rerender_with_warning(&state, View::Posts, PageQuery::default(), e),
    }
}

// POST /app/credentials
#[derive(Deserialize)]
pub struct CredentialForm {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub username: String,
}

pub async fn credentials_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialForm>,
) -> Response {
    let st = state.clone();
    let result = match parse_platform(&form.platform) {
        Ok(platform) => run_blocking(move || {
            credentials::save_credential(&st.credentials, platform, &form.username)
        })
        .await
        .and_then(|r| r.map_err(AppError::from)),
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Redirect::to("/app?view=credentials").into_response(),
        Err(e) => rerender_with_warning(&state, View::Credentials, PageQuery::default(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_parse_defaults_to_chat() {
        assert_eq!(View::parse(None), View::Chat);
        assert_eq!(View::parse(Some("nada")), View::Chat);
        assert_eq!(View::parse(Some(" Salon ")), View::Salon);
        for view in View::ALL {
            assert_eq!(View::parse(Some(view.as_str())), view);
        }
    }
}
