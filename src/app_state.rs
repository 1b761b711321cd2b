use std::sync::Arc;

use crate::{
    config::{Config, ReportFormat},
    repositories::InMemorySessionRepository,
    services::{
        bot_service::BotService, chat_transport::ChatTransport,
        dialogue_service::DialogueService,
        document_renderer::{DocumentRenderer, DocxDocumentRenderer, HtmlDocumentRenderer},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub bot_service: Arc<BotService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn ChatTransport>) -> Self {
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let dialogue_service = DialogueService::new(session_repository);

        let logo_path = config.logo_path.clone();
        let renderer: Arc<dyn DocumentRenderer> = match config.report_format {
            ReportFormat::Docx => Arc::new(DocxDocumentRenderer::new(logo_path)),
            ReportFormat::Html => Arc::new(HtmlDocumentRenderer::new(logo_path)),
        };
        let bot_service = Arc::new(BotService::new(
            dialogue_service,
            transport,
            renderer,
            &config.report_file_name,
        ));

        Self {
            bot_service,
            config: Arc::new(config),
        }
    }
}
