use std::env;

use chrono::Utc;
use serde::Serialize;

use crate::models::{Credential, Platform};
use crate::store::{JsonStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Informe o nome de usuário.")]
    MissingUsername,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Credential metadata plus whether the platform's secret is present in the environment.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialStatus {
    #[serde(flatten)]
    pub credential: Credential,
    pub secret_env_var: String,
    pub secret_configured: bool,
}

pub fn secret_env_var(platform: Platform) -> String {
    format!("{}_PASSWORD", platform.env_prefix())
}

/// Presence check only; the value is never read back.
pub fn secret_configured(platform: Platform) -> bool {
    env::var_os(secret_env_var(platform)).is_some_and(|v| !v.is_empty())
}

/// Stores the username for a platform, replacing any earlier record for it.
pub fn save_credential(
    store: &JsonStore<Credential>,
    platform: Platform,
    username: &str,
) -> Result<CredentialStatus, CredentialError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CredentialError::MissingUsername);
    }

    let credential = Credential {
        id: uuid::Uuid::new_v4().to_string(),
        platform,
        username: username.to_string(),
        saved_at: Utc::now().naive_utc(),
    };

    store.update(|items| {
        items.retain(|c| c.platform != platform);
        items.push(credential.clone());
    })?;

    tracing::info!(platform = platform.as_str(), "credential metadata saved");

    Ok(with_status(credential))
}

pub fn list_credentials(store: &JsonStore<Credential>) -> Vec<CredentialStatus> {
    store.load().into_iter().map(with_status).collect()
}

fn with_status(credential: Credential) -> CredentialStatus {
    CredentialStatus {
        secret_env_var: secret_env_var(credential.platform),
        secret_configured: secret_configured(credential.platform),
        credential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_naming() {
        assert_eq!(secret_env_var(Platform::Instagram), "INSTAGRAM_PASSWORD");
        assert_eq!(secret_env_var(Platform::ShopifyBlog), "SHOPIFY_BLOG_PASSWORD");
    }

    #[test]
    fn test_save_replaces_same_platform() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("credenciais.json"));

        save_credential(&store, Platform::TikTok, "loja_antiga").unwrap();
        save_credential(&store, Platform::Facebook, "loja_fb").unwrap();
        save_credential(&store, Platform::TikTok, " loja_nova ").unwrap();

        let all = list_credentials(&store);
        assert_eq!(all.len(), 2);
        let tiktok = all
            .iter()
            .find(|c| c.credential.platform == Platform::TikTok)
            .unwrap();
        assert_eq!(tiktok.credential.username, "loja_nova");
    }

    #[test]
    fn test_empty_username_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("credenciais.json"));
        assert!(matches!(
            save_credential(&store, Platform::Instagram, "  "),
            Err(CredentialError::MissingUsername)
        ));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_persisted_file_has_no_password_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credenciais.json");
        let store = JsonStore::new(&path);
        save_credential(&store, Platform::Instagram, "minhaloja").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("minhaloja"));
        assert!(!raw.to_lowercase().contains("password"));
        assert!(!raw.to_lowercase().contains("senha"));
    }
}
