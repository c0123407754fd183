use serde::Deserialize;
use std::path::PathBuf;

use crate::infrastructure::llm::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_YANDEX_COMPLETION_URL,
    DEFAULT_YANDEX_MODEL,
};
use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub observability: ObservabilityConfig,
    pub providers: ProvidersConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix every API route is nested under
    pub base_path: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Transport timeout for every outbound provider call
    pub request_timeout_secs: u64,
    pub yandex: YandexSettings,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YandexSettings {
    pub api_key: String,
    pub folder_id: String,
    pub model: String,
    pub completion_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret; an ephemeral one is generated at startup when empty
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    /// Directory for staged uploads, the OS temp dir when unset
    pub staging_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            base_path: "/api".to_string(),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 120,
            yandex: YandexSettings::default(),
            gemini: GeminiSettings::default(),
        }
    }
}

impl Default for YandexSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            folder_id: String::new(),
            model: DEFAULT_YANDEX_MODEL.to_string(),
            completion_url: DEFAULT_YANDEX_COMPLETION_URL.to_string(),
        }
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_hours: 24 * 14,
            cookie_name: "sessionid".to_string(),
            cookie_secure: false,
        }
    }
}

impl StorageConfig {
    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_legacy_env(|key| std::env::var(key).ok());

        Ok(app_config)
    }

    /// Fill empty provider credentials from the bare `YANDEX_API_KEY`,
    /// `YANDEX_FOLDER_ID` and `GIMINI_API` variables
    pub fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fill = |target: &mut String, key: &str| {
            if target.is_empty() {
                if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                    *target = value;
                }
            }
        };

        fill(&mut self.providers.yandex.api_key, "YANDEX_API_KEY");
        fill(&mut self.providers.yandex.folder_id, "YANDEX_FOLDER_ID");
        fill(&mut self.providers.gemini.api_key, "GIMINI_API");
    }
}
