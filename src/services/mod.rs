pub mod bot_service;
pub mod chat_transport;
pub mod dialogue_service;
pub mod document_renderer;
pub mod form_collector;
pub mod report_builder;
pub mod validation;
