use crate::config::AppConfig;
use crate::models::{Appointment, Credential, HistoryEntry, PostSchedule};
use crate::services::ai::LlmProvider;
use crate::store::JsonStore;

pub struct AppState {
    pub config: AppConfig,
    /// `None` answers every message from the fixed templates.
    pub llm: Option<Box<dyn LlmProvider>>,
    pub history: JsonStore<HistoryEntry>,
    pub appointments: JsonStore<Appointment>,
    pub posts: JsonStore<PostSchedule>,
    pub credentials: JsonStore<Credential>,
}

impl AppState {
    pub fn new(config: AppConfig, llm: Option<Box<dyn LlmProvider>>) -> Self {
        Self {
            history: JsonStore::new(config.history_path()),
            appointments: JsonStore::new(config.appointments_path()),
            posts: JsonStore::new(config.posts_path()),
            credentials: JsonStore::new(config.credentials_path()),
            config,
            llm,
        }
    }
}
