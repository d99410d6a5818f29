#![allow(dead_code)]

use actix_web::{web, App};
use liveavatar::config::{AppConfig, AppSettings, PaymentConfig, ServerConfig, UpstreamConfig};
use liveavatar::payment::{PaymentProvider, StripeCheckout};
use liveavatar::upstream::{AvatarApi, UpstreamClient};
use std::sync::Arc;

pub const API_KEY: &str = "test-api-key";

pub fn test_config(upstream_url: &str, payment_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        upstream: UpstreamConfig {
            base_url: upstream_url.to_string(),
            api_key: API_KEY.to_string(),
            timeout_secs: 5,
        },
        payment: PaymentConfig {
            api_base: payment_url.to_string(),
            secret_key: "sk_test_123".to_string(),
            currency: "eur".to_string(),
        },
        app: AppSettings {
            base_url: "https://demo.example".to_string(),
        },
    }
}

/// Builds the app exactly as `main` does, pointed at mock collaborators.
pub fn app(
    config: AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let upstream: Arc<dyn AvatarApi> = Arc::new(UpstreamClient::new(&config.upstream).unwrap());
    let payments: Arc<dyn PaymentProvider> = Arc::new(StripeCheckout::new(&config.payment));

    App::new()
        .app_data(web::Data::new(config))
        .app_data(web::Data::new(upstream))
        .app_data(web::Data::new(payments))
        .configure(liveavatar::api::configure)
}
