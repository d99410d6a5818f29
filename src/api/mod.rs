pub mod models;
pub mod routes;
pub mod routes_checkout;

use actix_web::{error::JsonPayloadError, error::QueryPayloadError, web, HttpRequest};

use crate::error::ProxyError;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ProxyError::validation(format!("Invalid JSON body: {}", err)).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ProxyError::validation(format!("Invalid query: {}", err)).into()
}

/// Registers the `/api` surface. Callers must provide `AppConfig`,
/// `Arc<dyn AvatarApi>` and `Arc<dyn PaymentProvider>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // The browser forms post without a content type
            .app_data(
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_error),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .configure(routes::configure)
            .configure(routes_checkout::configure),
    );
}
