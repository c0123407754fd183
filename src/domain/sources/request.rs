//! Source recommendation request

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Fields of a `POST /sources` body.
///
/// Every field is read permissively: missing or oddly-typed values become
/// empty text or an absent year instead of a rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecommendationRequest {
    #[serde(rename = "about", default, deserialize_with = "lenient_text")]
    pub topic: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub source_type: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub date_from: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub date_to: Option<String>,
}

impl RecommendationRequest {
    pub fn new(topic: impl Into<String>, source_type: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            source_type: source_type.into(),
            date_from: None,
            date_to: None,
        }
    }

    pub fn with_date_from(mut self, year: impl ToString) -> Self {
        self.date_from = Some(year.to_string());
        self
    }

    pub fn with_date_to(mut self, year: impl ToString) -> Self {
        self.date_to = Some(year.to_string());
        self
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Years arrive as numbers or strings; empty, zero and boolean values count as absent
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_body() {
        let body = r#"{"about": "Ownership in Rust", "type": "articles", "date_from": 2015, "date_to": "2020"}"#;
        let request: RecommendationRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.topic, "Ownership in Rust");
        assert_eq!(request.source_type, "articles");
        assert_eq!(request.date_from.as_deref(), Some("2015"));
        assert_eq!(request.date_to.as_deref(), Some("2020"));
    }

    #[test]
    fn test_empty_body_is_accepted() {
        let request: RecommendationRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(request, RecommendationRequest::default());
    }

    #[test]
    fn test_falsy_years_are_absent() {
        let body = r#"{"about": "x", "type": "books", "date_from": "", "date_to": 0}"#;
        let request: RecommendationRequest = serde_json::from_str(body).unwrap();

        assert!(request.date_from.is_none());
        assert!(request.date_to.is_none());

        let body = r#"{"date_from": null, "date_to": false}"#;
        let request: RecommendationRequest = serde_json::from_str(body).unwrap();

        assert!(request.date_from.is_none());
        assert!(request.date_to.is_none());
    }

    #[test]
    fn test_non_string_text_fields() {
        let body = r#"{"about": 42, "type": null}"#;
        let request: RecommendationRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.topic, "42");
        assert_eq!(request.source_type, "");
    }

    #[test]
    fn test_builder_helpers() {
        let request = RecommendationRequest::new("t", "s")
            .with_date_from(2001)
            .with_date_to(2010);

        assert_eq!(request.date_from.as_deref(), Some("2001"));
        assert_eq!(request.date_to.as_deref(), Some("2010"));
    }
}
