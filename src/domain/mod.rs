//! Domain layer - Core business logic and entities

pub mod error;
pub mod llm;
pub mod questions;
pub mod sources;
pub mod user;

pub use error::DomainError;
pub use llm::{
    CompletionProvider, CompletionRequest, ContentPart, Message, MessageRole, MultimodalProvider,
    ProviderAnswer, UploadedFile, Usage,
};
pub use questions::{Document, QuestionRequest};
pub use sources::RecommendationRequest;
pub use user::{User, UserId, UserRepository, UserValidationError};
