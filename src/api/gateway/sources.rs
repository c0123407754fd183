use axum::extract::State;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::{AnswerEnvelope, Json, JsonRejection};
use crate::domain::RecommendationRequest;

/// POST /sources
///
/// Asks the completion provider for literature on a topic.
pub async fn recommend_sources(
    State(state): State<AppState>,
    body: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AnswerEnvelope {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.message(), "Unreadable source recommendation body");
            return AnswerEnvelope::error();
        }
    };

    debug!(
        source_type = %request.source_type,
        has_date_from = request.date_from.is_some(),
        has_date_to = request.date_to.is_some(),
        "Source recommendation requested"
    );

    state.source_service.recommend(request).await.into()
}
