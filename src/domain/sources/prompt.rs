//! Prompt construction for source recommendations

use super::RecommendationRequest;
use crate::domain::llm::Message;

pub const SOURCE_SYSTEM_PROMPT: &str = "Ты помогаешь выбирать релевантные источники информации";

pub const NOT_EARLIER_THAN: &str = "не раньше";
pub const NOT_LATER_THAN: &str = "не позже";
pub const YEAR_CONJUNCTION: &str = " и ";

/// Build the two-message prompt (system + user) for a recommendation request
pub fn build_source_prompt(request: &RecommendationRequest) -> Vec<Message> {
    vec![
        Message::system(SOURCE_SYSTEM_PROMPT),
        Message::user(build_user_instruction(request)),
    ]
}

fn build_user_instruction(request: &RecommendationRequest) -> String {
    let mut text = format!(
        "Ты – помощник, который помогает студенту найти релевантные {} по теме: '{}'.",
        request.source_type, request.topic
    );

    if let Some(clause) = year_clause(request) {
        text.push_str(&format!(" Требования по годам: {}.", clause));
    }

    text.push_str(" Перечисли несколько основных источников с краткими пояснениями, почему они полезны.");
    text
}

/// "не раньше X", "не позже Y", both joined by the conjunction, or nothing
fn year_clause(request: &RecommendationRequest) -> Option<String> {
    let bounds: Vec<String> = [
        request
            .date_from
            .as_ref()
            .map(|year| format!("{} {}", NOT_EARLIER_THAN, year)),
        request
            .date_to
            .as_ref()
            .map(|year| format!("{} {}", NOT_LATER_THAN, year)),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!bounds.is_empty()).then(|| bounds.join(YEAR_CONJUNCTION))
}
