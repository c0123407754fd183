//! Thesis Gateway API
//!
//! Study assistant backend:
//! - literature recommendations from YandexGPT
//! - defense questions generated by Gemini from an uploaded presentation
//! - email/password accounts with cookie sessions

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use api::state::AppState;
use config::{AuthConfig, StorageBackend, StorageConfig};
use domain::UserRepository;
use infrastructure::{
    auth::{SessionConfig, SessionService},
    llm::ProviderFactory,
    services::{QuestionService, SourceService},
    user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService},
};

/// Build the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let completion = ProviderFactory::create_completion(&config.providers)?;
    let multimodal = ProviderFactory::create_multimodal(&config.providers)?;

    let staging_dir = config.storage.staging_dir();
    info!(staging_dir = %staging_dir.display(), "Uploaded documents will be staged locally");

    let user_service = UserService::new(
        create_user_repository(&config.storage).await?,
        Arc::new(Argon2Hasher::new()),
    );

    Ok(AppState::new(
        SourceService::new(completion),
        QuestionService::new(multimodal, &config.providers.gemini.model, staging_dir),
        user_service,
        Arc::new(SessionService::new(session_config(&config.auth))),
    ))
}

async fn create_user_repository(
    storage: &StorageConfig,
) -> anyhow::Result<Arc<dyn UserRepository>> {
    match storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory user storage; accounts are lost on restart");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageBackend::Postgres => {
            let url = storage
                .database_url
                .as_deref()
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    anyhow::anyhow!("storage.database_url is required for the postgres backend")
                })?;

            let repository = PostgresUserRepository::connect(url).await?;
            info!("Connected to PostgreSQL user storage");
            Ok(Arc::new(repository))
        }
    }
}

fn session_config(auth: &AuthConfig) -> SessionConfig {
    let secret = if auth.session_secret.is_empty() {
        warn!("auth.session_secret is not set; sessions will not survive a restart");
        format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        )
    } else {
        auth.session_secret.clone()
    };

    SessionConfig::new(secret)
        .with_ttl_hours(auth.session_ttl_hours)
        .with_cookie(&auth.cookie_name, auth.cookie_secure)
}
