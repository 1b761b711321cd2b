use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    constants::prompts,
    errors::AppResult,
    models::{domain::TestSession, dto::telegram::ChatId},
    repositories::SessionRepository,
    services::form_collector::{FormCollector, Transition},
};

/// What to tell the user after a text message.
#[derive(Clone, Debug, PartialEq)]
pub enum DialogueReply {
    /// Next question, or a corrective message for the same question.
    Prompt(String),
    /// Form finished; the session has already been removed from storage.
    Completed(TestSession),
    /// The chat has no form in progress.
    NoSession,
}

/// Keeps one [`FormCollector`] per chat and routes messages to it.
///
/// Every operation holds the chat's lock from the first repository read to the
/// last write, so updates for one chat apply one at a time and a cancel can
/// never be overwritten by an answer that read the form before it.
pub struct DialogueService {
    repository: Arc<dyn SessionRepository>,
    chat_locks: Mutex<HashMap<ChatId, Arc<Mutex<()>>>>,
}

impl DialogueService {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            chat_locks: Mutex::new(HashMap::new()),
        }
    }

    // Entries are never pruned: dropping one while a caller waits on it would
    // let a second caller create a fresh lock for the same chat.
    async fn lock_chat(&self, chat_id: ChatId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.chat_locks.lock().await;
            Arc::clone(locks.entry(chat_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Begins a fresh form, replacing any form already in progress.
    pub async fn on_start(&self, chat_id: ChatId) -> AppResult<String> {
        let _guard = self.lock_chat(chat_id).await;
        let collector = FormCollector::new();
        let prompt = collector.prompt();

        if self.repository.remove(chat_id).await? {
            log::info!("Restarting form for chat {}", chat_id);
        } else {
            log::info!("Starting form for chat {}", chat_id);
        }
        self.repository.save(chat_id, collector).await?;

        Ok(prompt)
    }

    pub async fn on_text(&self, chat_id: ChatId, text: &str) -> AppResult<DialogueReply> {
        let _guard = self.lock_chat(chat_id).await;
        let Some(mut collector) = self.repository.find(chat_id).await? else {
            return Ok(DialogueReply::NoSession);
        };

        match collector.accept(text) {
            Ok(Transition::Prompt(prompt)) => {
                log::debug!("Chat {} advanced to {:?}", chat_id, collector.step());
                self.repository.save(chat_id, collector).await?;
                Ok(DialogueReply::Prompt(prompt))
            }
            Ok(Transition::Retry(err)) => Ok(DialogueReply::Prompt(err.to_string())),
            Ok(Transition::Complete(session)) => {
                self.repository.remove(chat_id).await?;
                log::info!(
                    "Form completed for chat {} ({} students, {} skills)",
                    chat_id,
                    session.students.len(),
                    session.skills.len()
                );
                Ok(DialogueReply::Completed(session))
            }
            Err(e) => {
                self.repository.remove(chat_id).await?;
                Err(e)
            }
        }
    }

    pub async fn on_cancel(&self, chat_id: ChatId) -> AppResult<String> {
        let _guard = self.lock_chat(chat_id).await;
        if self.repository.remove(chat_id).await? {
            log::info!("Form cancelled for chat {}", chat_id);
        }
        Ok(prompts::CANCELLED.to_string())
    }
}
