use std::sync::Arc;

use crate::{
    constants::prompts,
    errors::AppResult,
    models::{
        domain::TestSession,
        dto::telegram::{BotCommand, ChatId, Update},
    },
    services::{
        chat_transport::ChatTransport,
        dialogue_service::{DialogueReply, DialogueService},
        document_renderer::DocumentRenderer,
        report_builder::ReportBuilder,
    },
};

/// Routes webhook updates through the dialogue and sends every reply.
pub struct BotService {
    dialogue: DialogueService,
    transport: Arc<dyn ChatTransport>,
    renderer: Arc<dyn DocumentRenderer>,
    report_file_name: String,
}

impl BotService {
    pub fn new(
        dialogue: DialogueService,
        transport: Arc<dyn ChatTransport>,
        renderer: Arc<dyn DocumentRenderer>,
        report_file_name: &str,
    ) -> Self {
        Self {
            dialogue,
            transport,
            renderer,
            report_file_name: report_file_name.to_string(),
        }
    }

    pub async fn handle_update(&self, update: Update) -> AppResult<()> {
        let Some(message) = update.message else {
            log::debug!("Ignoring update {} without a message", update.update_id);
            return Ok(());
        };
        let Some(text) = message.text else {
            log::debug!("Ignoring non-text message {}", message.message_id);
            return Ok(());
        };
        let chat_id = message.chat.id;

        match BotCommand::parse(&text) {
            Some(BotCommand::Start) => {
                let prompt = self.dialogue.on_start(chat_id).await?;
                self.transport.send_text(chat_id, &prompt).await
            }
            Some(BotCommand::Cancel) => {
                let confirmation = self.dialogue.on_cancel(chat_id).await?;
                self.transport.send_text(chat_id, &confirmation).await
            }
            Some(BotCommand::Other(command)) => {
                log::debug!("Ignoring unknown command /{} in chat {}", command, chat_id);
                Ok(())
            }
            None => match self.dialogue.on_text(chat_id, &text).await? {
                DialogueReply::Prompt(prompt) => self.transport.send_text(chat_id, &prompt).await,
                DialogueReply::NoSession => {
                    self.transport
                        .send_text(chat_id, prompts::NO_ACTIVE_SESSION)
                        .await
                }
                DialogueReply::Completed(session) => self.deliver_report(chat_id, session).await,
            },
        }
    }

    async fn deliver_report(&self, chat_id: ChatId, session: TestSession) -> AppResult<()> {
        let report = match ReportBuilder::build_report(session) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Report generation aborted for chat {}: {}", chat_id, e);
                return self.transport.send_text(chat_id, prompts::REPORT_FAILED).await;
            }
        };

        let file_name = self.renderer.file_name(&self.report_file_name);
        let delivered = match self.renderer.render(&report) {
            Ok(bytes) => {
                self.transport
                    .send_document(chat_id, bytes, &file_name)
                    .await
            }
            Err(e) => Err(e),
        };

        match delivered {
            Ok(()) => {
                log::info!("Delivered {} to chat {}", file_name, chat_id);
                self.transport
                    .send_text(chat_id, prompts::REPORT_DELIVERED)
                    .await
            }
            Err(e) => {
                log::error!("Failed to deliver report to chat {}: {}", chat_id, e);
                self.transport.send_text(chat_id, prompts::REPORT_FAILED).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::AppError,
        models::dto::telegram::{Chat, Message},
        repositories::{InMemorySessionRepository, SessionRepository},
        services::{
            chat_transport::MockChatTransport, document_renderer::HtmlDocumentRenderer,
            form_collector::FormCollector,
        },
        test_utils::fixtures::scenario_answers,
    };

    const CHAT: ChatId = 7;

    fn text_update(text: &str) -> Update {
        Update {
            update_id: 1,
            message: Some(Message {
                message_id: 1,
                chat: Chat { id: CHAT },
                text: Some(text.to_string()),
            }),
        }
    }

    fn bot(
        transport: MockChatTransport,
        repository: Arc<InMemorySessionRepository>,
    ) -> BotService {
        BotService::new(
            DialogueService::new(repository),
            Arc::new(transport),
            Arc::new(HtmlDocumentRenderer::new(None)),
            "End-of-Course Test Results",
        )
    }

    /// Repository holding a form that needs only Bob's score of 20.
    async fn repository_before_last_answer() -> Arc<InMemorySessionRepository> {
        let repository = Arc::new(InMemorySessionRepository::new());
        let answers = scenario_answers();
        let mut collector = FormCollector::new();
        for answer in &answers[..answers.len() - 1] {
            collector.accept(answer).unwrap();
        }
        repository.save(CHAT, collector).await.unwrap();
        repository
    }

    #[actix_web::test]
    async fn start_command_sends_greeting() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send_text()
            .withf(|chat_id, text| *chat_id == CHAT && text.contains("Who is the class instructor?"))
            .times(1)
            .returning(|_, _| Ok(()));
        let bot = bot(transport, Arc::new(InMemorySessionRepository::new()));

        bot.handle_update(text_update("/start")).await.unwrap();
    }

    #[actix_web::test]
    async fn plain_text_without_form_sends_hint() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send_text()
            .withf(|_, text| text.contains("Send /start to begin"))
            .times(1)
            .returning(|_, _| Ok(()));
        let bot = bot(transport, Arc::new(InMemorySessionRepository::new()));

        bot.handle_update(text_update("Ana")).await.unwrap();
    }

    #[actix_web::test]
    async fn unknown_commands_and_empty_updates_are_ignored() {
        let transport = MockChatTransport::new();
        let bot = bot(transport, Arc::new(InMemorySessionRepository::new()));

        bot.handle_update(text_update("/help")).await.unwrap();
        bot.handle_update(Update {
            update_id: 2,
            message: None,
        })
        .await
        .unwrap();
    }

    #[actix_web::test]
    async fn last_score_delivers_document_then_confirmation() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send_document()
            .withf(|chat_id, bytes, file_name| {
                *chat_id == CHAT
                    && bytes.starts_with(b"<!DOCTYPE html>")
                    && file_name.ends_with("End-of-Course Test Results.html")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        transport
            .expect_send_text()
            .withf(|_, text| text.contains("created successfully"))
            .times(1)
            .returning(|_, _| Ok(()));
        let repository = repository_before_last_answer().await;
        let bot = bot(transport, repository.clone());

        bot.handle_update(text_update("20")).await.unwrap();

        assert!(repository.find(CHAT).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn delivery_failure_is_reported_without_retry() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send_document()
            .times(1)
            .returning(|_, _, _| Err(AppError::Transport("connection reset".to_string())));
        transport
            .expect_send_text()
            .withf(|_, text| text.contains("could not be created"))
            .times(1)
            .returning(|_, _| Ok(()));
        let bot = bot(transport, repository_before_last_answer().await);

        bot.handle_update(text_update("20")).await.unwrap();
    }

    #[actix_web::test]
    async fn cancel_command_confirms() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send_text()
            .withf(|_, text| text.contains("Operation cancelled"))
            .times(1)
            .returning(|_, _| Ok(()));
        let repository = repository_before_last_answer().await;
        let bot = bot(transport, repository.clone());

        bot.handle_update(text_update("/cancel")).await.unwrap();

        assert!(repository.find(CHAT).await.unwrap().is_none());
    }
}
