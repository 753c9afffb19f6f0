use std::env;
use std::path::PathBuf;

pub const HISTORY_FILE: &str = "historico.json";
pub const APPOINTMENTS_FILE: &str = "agendamentos_salao.json";
pub const POSTS_FILE: &str = "agendamentos.json";
pub const CREDENTIALS_FILE: &str = "credenciais.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub media_dir: PathBuf,
    pub responder: String,
    pub model_url: String,
    pub model_api_token: String,
    pub model_timeout_secs: u64,
    pub model_max_tokens: u32,
    pub model_temperature: f32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            media_dir: env::var("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            responder: env::var("RESPONDER").unwrap_or_else(|_| "templates".to_string()),
            model_url: env::var("MODEL_URL").unwrap_or_else(|_| {
                "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2"
                    .to_string()
            }),
            model_api_token: env::var("MODEL_API_TOKEN").unwrap_or_default(),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            model_max_tokens: env::var("MODEL_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            model_temperature: env::var("MODEL_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    pub fn appointments_path(&self) -> PathBuf {
        self.data_dir.join(APPOINTMENTS_FILE)
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join(POSTS_FILE)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(CREDENTIALS_FILE)
    }
}
