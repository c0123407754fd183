//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::SessionIssuer;
use crate::infrastructure::services::{QuestionService, SourceService};
use crate::infrastructure::user::UserService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub source_service: Arc<SourceService>,
    pub question_service: Arc<QuestionService>,
    pub user_service: Arc<UserService>,
    pub session_issuer: Arc<dyn SessionIssuer>,
}

impl AppState {
    pub fn new(
        source_service: SourceService,
        question_service: QuestionService,
        user_service: UserService,
        session_issuer: Arc<dyn SessionIssuer>,
    ) -> Self {
        Self {
            source_service: Arc::new(source_service),
            question_service: Arc::new(question_service),
            user_service: Arc::new(user_service),
            session_issuer,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
