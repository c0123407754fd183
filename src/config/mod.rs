//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, GeminiSettings, LogFormat, LoggingConfig, ProvidersConfig,
    ServerConfig, StorageBackend, StorageConfig, YandexSettings,
};
