//! Source recommendation domain
//!
//! Request shape and prompt construction for the `/sources` gateway.

mod prompt;
mod request;

pub use prompt::{
    build_source_prompt, NOT_EARLIER_THAN, NOT_LATER_THAN, SOURCE_SYSTEM_PROMPT, YEAR_CONJUNCTION,
};
pub use request::RecommendationRequest;

/// Sampling temperature for source recommendations
pub const SOURCE_TEMPERATURE: f32 = 0.6;

/// Output token cap for source recommendations
pub const SOURCE_MAX_TOKENS: u32 = 1000;
