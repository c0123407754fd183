//! LLM provider implementations

mod factory;
mod gemini;
mod http_client;
mod yandex;

pub use factory::ProviderFactory;
pub use gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use http_client::{HttpClient, HttpClientTrait};
pub use yandex::{
    YandexGptConfig, YandexGptProvider, DEFAULT_YANDEX_COMPLETION_URL, DEFAULT_YANDEX_MODEL,
};
