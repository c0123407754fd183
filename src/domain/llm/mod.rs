//! LLM provider domain models and traits

mod message;
mod provider;
mod request;
mod response;

pub use message::{ContentPart, Message, MessageRole};
pub use provider::{CompletionProvider, MultimodalProvider};
pub use request::{CompletionRequest, CompletionRequestBuilder};
pub use response::{ProviderAnswer, UploadedFile, Usage};

#[cfg(test)]
pub use provider::mock::{MockCompletionProvider, MockMultimodalProvider, ObservedUpload};
