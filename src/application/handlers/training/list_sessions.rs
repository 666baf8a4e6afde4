//! ListSessionsHandler - Query handler for the caller's sessions.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::session::TrainingError;
use crate::ports::{SessionStore, SessionSummary};

#[derive(Debug, Clone)]
pub struct ListSessionsQuery {
    pub user_id: UserId,
}

/// Handler for listing sessions, newest first.
pub struct ListSessionsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListSessionsQuery) -> Result<Vec<SessionSummary>, TrainingError> {
        Ok(self.store.list_by_owner(&query.user_id).await?)
    }
}
