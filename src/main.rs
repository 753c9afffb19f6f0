use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use mssp::config::AppConfig;
use mssp::handlers;
use mssp::services::ai::hosted::HostedInferenceProvider;
use mssp::services::ai::LlmProvider;
use mssp::state::AppState;

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let llm: Option<Box<dyn LlmProvider>> = match config.responder.as_str() {
        "model" => {
            tracing::info!(url = %config.model_url, "using hosted model responder");
            if config.model_api_token.is_empty() {
                tracing::warn!("MODEL_API_TOKEN not set, calling the model endpoint unauthenticated");
            }
            Some(Box::new(HostedInferenceProvider::new(
                config.model_url.clone(),
                config.model_api_token.clone(),
                Duration::from_secs(config.model_timeout_secs),
                config.model_max_tokens,
                config.model_temperature,
            )?))
        }
        _ => {
            tracing::info!("using template responder");
            None
        }
    };

    tracing::info!(
        data_dir = %config.data_dir.display(),
        media_dir = %config.media_dir.display(),
        "storage locations"
    );

    let state = Arc::new(AppState::new(config.clone(), llm));

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/", get(handlers::pages::redirect_to_app))
        .route("/app", get(handlers::pages::app_page))
        .route("/app/chat", post(handlers::pages::chat_submit))
        .route(
            "/app/history/:id/delete",
            post(handlers::pages::history_delete),
        )
        .route("/app/salon", post(handlers::pages::salon_submit))
        .route("/app/posts", post(handlers::pages::posts_submit))
        .route("/app/credentials", post(handlers::pages::credentials_submit))
        .route("/api/chat", post(handlers::chat::send_message))
        .route(
            "/api/history",
            get(handlers::chat::get_history).delete(handlers::chat::clear_history),
        )
        .route("/api/history/:id", delete(handlers::chat::delete_entry))
        .route(
            "/api/salon/professionals",
            get(handlers::salon::list_professionals),
        )
        .route(
            "/api/salon/availability",
            get(handlers::salon::get_availability),
        )
        .route(
            "/api/salon/appointments",
            get(handlers::salon::list_appointments).post(handlers::salon::create_appointment),
        )
        .route(
            "/api/salon/appointments/:id/cancel",
            post(handlers::salon::cancel_appointment),
        )
        .route(
            "/api/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route("/api/posts/slots", get(handlers::posts::list_slots))
        .route("/api/posts/:id", delete(handlers::posts::delete_post))
        .route(
            "/api/credentials",
            get(handlers::credentials::list_credentials)
                .post(handlers::credentials::save_credential),
        )
        .route(
            "/api/media/:kind",
            post(handlers::media::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
