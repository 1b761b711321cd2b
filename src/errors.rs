use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Malformed session: {0}")]
    MalformedSession(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedSession(_)
            | AppError::Rendering(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::MalformedSession(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Rejected answer in the dialogue. The message is shown to the user as-is
/// before the same question is asked again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("The {field} cannot be empty. Please try again.")]
    EmptyField { field: &'static str },

    #[error("Invalid date format. Please enter the {field} as YYYY-MM-DD.")]
    InvalidDateFormat { field: &'static str },

    #[error("Invalid date. Please enter a real {field} in YYYY-MM-DD format.")]
    InvalidDateValue { field: &'static str },

    #[error("Please enter a valid positive number for {field}.")]
    NotAPositiveInteger { field: &'static str },

    #[error("Please enter a valid positive number for {field}.")]
    NotAPositiveNumber { field: &'static str },

    #[error("Please enter a valid score between {min} and {}.", score_bound(.max))]
    ScoreOutOfRange { min: f64, max: f64 },
}

// Same rendering as the report's sub-header, so a max of 10 reads `10.0`.
fn score_bound(max: &f64) -> String {
    crate::services::report_builder::format_number(*max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::Configuration("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Transport("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::MalformedSession("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::MalformedSession("2 students expected".into());
        assert_eq!(err.to_string(), "Malformed session: 2 students expected");
    }

    #[test]
    fn test_input_error_messages_name_the_field() {
        let err = InputError::InvalidDateFormat { field: "test date" };
        assert_eq!(
            err.to_string(),
            "Invalid date format. Please enter the test date as YYYY-MM-DD."
        );

        let err = InputError::ScoreOutOfRange { min: 0.0, max: 7.5 };
        assert_eq!(err.to_string(), "Please enter a valid score between 0 and 7.5.");
    }

    #[test]
    fn test_score_message_shows_integral_max_with_decimal() {
        let err = InputError::ScoreOutOfRange { min: 0.0, max: 10.0 };
        assert_eq!(err.to_string(), "Please enter a valid score between 0 and 10.0.");
    }
}
