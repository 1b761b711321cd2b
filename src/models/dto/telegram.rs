use serde::{Deserialize, Serialize};

pub type ChatId = i64;

/// Incoming webhook payload. Only the fields the bot reads are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Cancel,
    Other(String),
}

impl BotCommand {
    /// Parses `/start`, `/cancel@my_bot` and friends. Returns `None` for plain text.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.trim().split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        Some(match name {
            "start" => BotCommand::Start,
            "cancel" => BotCommand::Cancel,
            other => BotCommand::Other(other.to_string()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: ChatId,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SetWebhookRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,
    pub allowed_updates: Vec<&'a str>,
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
pub struct TelegramResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
