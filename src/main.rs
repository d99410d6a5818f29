use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use liveavatar::cli::{commands::{Cli, Commands}, run_cli};
use liveavatar::config::AppConfig;
use liveavatar::payment::{PaymentProvider, StripeCheckout};
use liveavatar::upstream::{AvatarApi, UpstreamClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "healthy"}))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        run_cli(cli.command, &cli.server).await;
        return Ok(());
    }

    info!("Starting LiveAvatar proxy...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let upstream: Arc<dyn AvatarApi> = match UpstreamClient::new(&config.upstream) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to initialize upstream client: {}", e);
            std::process::exit(1);
        }
    };
    let payments: Arc<dyn PaymentProvider> = Arc::new(StripeCheckout::new(&config.payment));

    let host = config.server.host.clone();
    let port = config.server.port;

    info!(upstream = %config.upstream.base_url, "Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(upstream.clone()))
            .app_data(web::Data::new(payments.clone()))
            .route("/health", web::get().to(health))
            .configure(liveavatar::api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
