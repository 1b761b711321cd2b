use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::AppResult, models::dto::telegram::ChatId, services::form_collector::FormCollector,
};

/// Storage for in-progress forms, one per chat.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find(&self, chat_id: ChatId) -> AppResult<Option<FormCollector>>;
    async fn save(&self, chat_id: ChatId, collector: FormCollector) -> AppResult<()>;
    /// Returns `true` when a form was discarded.
    async fn remove(&self, chat_id: ChatId) -> AppResult<bool>;
}

/// Process-local store. Forms are lost on restart.
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<ChatId, FormCollector>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find(&self, chat_id: ChatId) -> AppResult<Option<FormCollector>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&chat_id).cloned())
    }

    async fn save(&self, chat_id: ChatId, collector: FormCollector) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(chat_id, collector);
        Ok(())
    }

    async fn remove(&self, chat_id: ChatId) -> AppResult<bool> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(&chat_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn save_then_find_returns_stored_form() {
        let repository = InMemorySessionRepository::new();
        let mut collector = FormCollector::new();
        collector.accept("Ana").unwrap();

        repository.save(1, collector.clone()).await.unwrap();

        assert_eq!(repository.find(1).await.unwrap(), Some(collector));
        assert_eq!(repository.find(2).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn remove_reports_whether_a_form_existed() {
        let repository = InMemorySessionRepository::new();
        repository.save(1, FormCollector::new()).await.unwrap();

        assert!(repository.remove(1).await.unwrap());
        assert!(!repository.remove(1).await.unwrap());
        assert!(repository.find(1).await.unwrap().is_none());
    }
}
