use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use contractor_api::{config, handlers};
use contractor_sync::{DataStore, MockSyncApi, SyncApi};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[get("/health")]
async fn health(store: web::Data<Arc<DataStore>>) -> impl Responder {
    let projects = store.projects().await.len();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "projects": projects
    }))
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("contractor-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let loaded = match &args.config {
        Some(path) => config::ApiConfig::load_from(path),
        None => config::ApiConfig::load(),
    };
    let (config, config_path) = loaded.map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Failed to load config: {e}"),
        )
    })?;
    tracing::info!("Config loaded from {:?}", config_path);
    if let Ok(effective) = config.to_toml() {
        tracing::debug!("Effective config:\n{}", effective);
    }

    let server_config = config.server();
    let mock_config = config.mock();

    // Seed the in-memory store once; it lives for the whole process
    let store = Arc::new(DataStore::seeded());
    let sync_api: Arc<dyn SyncApi> = Arc::new(
        MockSyncApi::new(store.clone())
            .with_latency(mock_config.latency())
            .with_failure_rate(mock_config.failure_rate),
    );

    tracing::info!(
        "Mock store seeded (latency {}ms, failure rate {})",
        mock_config.latency_ms,
        mock_config.failure_rate
    );
    tracing::info!(
        "Server will listen on {}:{}",
        server_config.host,
        server_config.port
    );

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "PATCH", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "PATCH", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(sync_api.clone()))
            .service(health)
            .configure(handlers::configure)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await
}
