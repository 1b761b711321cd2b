use std::{env, path::PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const WEBHOOK_PATH: &str = "/webhook";

/// File type of the delivered report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Docx,
    Html,
}

impl std::str::FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "docx" => Ok(ReportFormat::Docx),
            "html" => Ok(ReportFormat::Html),
            other => Err(AppError::Configuration(format!(
                "Unknown REPORT_FORMAT '{}', expected docx or html",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: SecretString,
    pub telegram_api_url: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub external_url: Option<String>,
    pub webhook_secret: Option<SecretString>,
    pub logo_path: Option<PathBuf>,
    pub report_file_name: String,
    pub report_format: ReportFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bot_token: SecretString::from(env::var("BOT_TOKEN").unwrap_or_default()),
            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            external_url: env::var("RENDER_EXTERNAL_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            webhook_secret: env::var("WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .map(SecretString::from),
            logo_path: Some(
                env::var("LOGO_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("logo.png")),
            ),
            report_file_name: env::var("REPORT_FILE_NAME")
                .unwrap_or_else(|_| "End-of-Course Test Results".to_string()),
            report_format: env::var("REPORT_FORMAT")
                .ok()
                .and_then(|f| f.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Checks the settings the bot cannot start without.
    pub fn validate(&self) -> AppResult<()> {
        if self.bot_token.expose_secret().trim().is_empty() {
            return Err(AppError::Configuration(
                "No BOT_TOKEN found in environment variables".to_string(),
            ));
        }

        if self.external_url.is_none() {
            return Err(AppError::Configuration(
                "RENDER_EXTERNAL_URL not set".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL Telegram should deliver updates to.
    pub fn webhook_url(&self) -> Option<String> {
        self.external_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), WEBHOOK_PATH))
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            bot_token: SecretString::from("123456:test-token".to_string()),
            telegram_api_url: "http://127.0.0.1:9".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 10000,
            external_url: Some("https://bot.example.com/".to_string()),
            webhook_secret: None,
            logo_path: None,
            report_file_name: "End-of-Course Test Results".to_string(),
            report_format: ReportFormat::Docx,
        }
    }
}
