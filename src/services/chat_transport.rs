use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::dto::telegram::{ChatId, SendMessageRequest, SetWebhookRequest, TelegramResponse},
};

/// Outbound side of the chat: plain replies and file attachments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<()>;
    async fn send_document(&self, chat_id: ChatId, bytes: Vec<u8>, file_name: &str)
        -> AppResult<()>;
}

/// Telegram Bot API client.
pub struct TelegramTransport {
    client: reqwest::Client,
    api_url: String,
    token: SecretString,
}

impl TelegramTransport {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.telegram_api_url.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token.expose_secret(), method)
    }

    /// Points Telegram at our webhook endpoint.
    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> AppResult<()> {
        let request = SetWebhookRequest {
            url,
            secret_token,
            allowed_updates: vec!["message"],
        };

        let response = self
            .client
            .post(self.method_url("setWebhook"))
            .json(&request)
            .send()
            .await?;

        Self::check_response("setWebhook", response).await?;
        log::info!("Webhook registered at {}", url);
        Ok(())
    }

    async fn check_response(method: &str, response: reqwest::Response) -> AppResult<()> {
        let status = response.status();
        let body: TelegramResponse = response.json().await.map_err(|e| {
            AppError::Transport(format!("{method} returned an unreadable body ({status}): {e}"))
        })?;

        if !body.ok {
            let description = body.description.unwrap_or_else(|| "no description".to_string());
            log::error!("Telegram {} failed with {}: {}", method, status, description);
            return Err(AppError::Transport(format!("{method} failed: {description}")));
        }

        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await?;

        Self::check_response("sendMessage", response).await
    }

    async fn send_document(
        &self,
        chat_id: ChatId,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> AppResult<()> {
        let document = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", document);

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?;

        Self::check_response("sendDocument", response).await
    }
}
