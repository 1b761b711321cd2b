use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use secrecy::ExposeSecret;

use course_results_bot::{
    app_state::AppState,
    config::{Config, WEBHOOK_PATH},
    handlers,
    middleware::WebhookSecret,
    services::chat_transport::TelegramTransport,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config
        .validate()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let transport = Arc::new(TelegramTransport::new(&config));
    let webhook_secret = config
        .webhook_secret
        .as_ref()
        .map(|secret| secret.expose_secret().to_string());

    if let Some(url) = config.webhook_url() {
        transport
            .set_webhook(&url, webhook_secret.as_deref())
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
    }

    let bind = (config.web_server_host.clone(), config.web_server_port);
    let state = web::Data::new(AppState::new(config, transport));

    log::info!("Bot is starting with webhook on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .service(handlers::health_check)
            .service(handlers::health_check_live)
            .service(
                web::resource(WEBHOOK_PATH)
                    .wrap(WebhookSecret::new(webhook_secret.as_deref()))
                    .route(web::post().to(handlers::receive_update)),
            )
    })
    .bind(bind)?
    .run()
    .await
}
