use actix_web::{web, HttpResponse};

use crate::{app_state::AppState, models::dto::telegram::Update};

/// Telegram redelivers any update that does not get a 2xx, so failures are
/// logged here and never surfaced as an error status.
pub async fn receive_update(
    state: web::Data<AppState>,
    update: web::Json<Update>,
) -> HttpResponse {
    let update = update.into_inner();
    let update_id = update.update_id;

    if let Err(e) = state.bot_service.handle_update(update).await {
        log::error!("Failed to handle update {}: {}", update_id, e);
    }

    HttpResponse::Ok().finish()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;

    use super::*;
    use crate::{
        config::{Config, WEBHOOK_PATH},
        errors::{AppError, AppResult},
        models::dto::telegram::ChatId,
        services::chat_transport::ChatTransport,
    };

    #[derive(Default)]
    struct RecordingTransport {
        texts: Mutex<Vec<(ChatId, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<()> {
            if self.fail {
                return Err(AppError::Transport("telegram is down".to_string()));
            }
            self.texts.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }

        async fn send_document(&self, _: ChatId, _: Vec<u8>, _: &str) -> AppResult<()> {
            Ok(())
        }
    }

    fn start_payload() -> serde_json::Value {
        serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "chat": {"id": 99, "type": "private"},
                "text": "/start"
            }
        })
    }

    #[actix_web::test]
    async fn start_update_is_answered_with_greeting() {
        let transport = Arc::new(RecordingTransport::default());
        let state = AppState::new(Config::test_config(), transport.clone());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route(WEBHOOK_PATH, web::post().to(receive_update)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(WEBHOOK_PATH)
            .set_json(start_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let texts = transport.texts.lock().unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, 99);
        assert!(texts[0].1.contains("Who is the class instructor?"));
    }

    #[actix_web::test]
    async fn transport_failure_still_acknowledges_update() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        let state = AppState::new(Config::test_config(), transport);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route(WEBHOOK_PATH, web::post().to(receive_update)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(WEBHOOK_PATH)
            .set_json(start_payload())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_payload_is_rejected() {
        let state = AppState::new(
            Config::test_config(),
            Arc::new(RecordingTransport::default()),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route(WEBHOOK_PATH, web::post().to(receive_update)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(WEBHOOK_PATH)
            .set_json(serde_json::json!({"message": "not an update"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
