use actix_web::{post, web, HttpResponse, Result as WebResult};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::api::models::CheckoutRedirect;
use crate::config::AppConfig;
use crate::payment::{models::CheckoutRequest, PaymentError, PaymentProvider};

const CHECKOUT_FALLBACK: &str = "Failed to create checkout session";

#[post("/checkout")]
pub async fn create_checkout(
    config: web::Data<AppConfig>,
    payments: web::Data<Arc<dyn PaymentProvider>>,
    req: web::Json<CheckoutRequest>,
) -> WebResult<HttpResponse> {
    let item = match req.line_item() {
        Ok(item) => item,
        Err(e) => return Ok(HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))),
    };

    match payments
        .create_checkout_session(&item, &config.app.success_url(), &config.app.cancel_url())
        .await
    {
        Ok(session) => Ok(HttpResponse::Ok().json(CheckoutRedirect { url: session.url })),
        Err(e) => {
            error!(provider = payments.name(), "Checkout failed: {}", e);
            let message = match e {
                PaymentError::Provider(message) if !message.is_empty() => message,
                _ => CHECKOUT_FALLBACK.to_string(),
            };
            Ok(HttpResponse::InternalServerError().json(json!({ "error": message })))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_checkout);
}
