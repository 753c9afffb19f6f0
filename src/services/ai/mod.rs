pub mod hosted;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Failures of a model call. The `Display` text is what the user sees in place
/// of the assistant's reply.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("⚠️ Limite de requisições atingido no modelo. Aguarde alguns instantes e tente novamente.")]
    RateLimited,

    #[error("Erro na API: {0}")]
    Status(u16),

    #[error("Erro de conexão: {0}")]
    Transport(String),

    #[error("Erro ao interpretar a resposta do modelo.")]
    Malformed,
}

impl From<reqwest::Error> for ModelError {
    fn from(e: reqwest::Error) -> Self {
        ModelError::Transport(e.to_string())
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> Result<String, ModelError>;
}
