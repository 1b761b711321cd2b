use std::{future::Ready, rc::Rc};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures::future::LocalBoxFuture;

use crate::errors::ErrorResponse;

pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Rejects webhook calls whose secret token header does not match the one
/// registered with Telegram. With no secret configured every call passes.
pub struct WebhookSecret {
    secret: Option<Rc<str>>,
}

impl WebhookSecret {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret: secret.map(Rc::from),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for WebhookSecret
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = WebhookSecretService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(WebhookSecretService {
            service: Rc::new(service),
            secret: self.secret.clone(),
        }))
    }
}

pub struct WebhookSecretService<S> {
    service: Rc<S>,
    secret: Option<Rc<str>>,
}

impl<S, B> Service<ServiceRequest> for WebhookSecretService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(expected) = &self.secret {
            let provided = req
                .headers()
                .get(SECRET_TOKEN_HEADER)
                .and_then(|h| h.to_str().ok());

            if provided != Some(&**expected) {
                log::warn!("Rejected webhook call with missing or wrong secret token");
                let response = HttpResponse::Unauthorized().json(ErrorResponse {
                    error: "Invalid webhook secret token".to_string(),
                    code: 401,
                });
                return Box::pin(async move {
                    Ok(req.into_response(response).map_into_right_body())
                });
            }
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
