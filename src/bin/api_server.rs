// src/bin/api_server.rs

use clap::Parser;
use restaurant_tracker::infra::config::{Settings, StoreBackend};
use restaurant_tracker::infra::logging::init_logger;
use restaurant_tracker::transport;
use restaurant_tracker::RestaurantService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Parser, Debug)]
#[command(name = "api_server", about = "Restaurant tracker REST API")]
struct Args {
    /// Address to listen on (overrides API_BIND_ADDR)
    #[arg(short, long)]
    bind: Option<String>,

    /// Keep everything in process memory instead of PostgreSQL
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut settings = Settings::from_env()?;
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }
    if args.memory {
        settings.store_backend = StoreBackend::Memory;
    }
    init_logger(settings.log_format);

    tracing::info!(backend = ?settings.store_backend, "initializing restaurant service");
    let service = RestaurantService::from_settings(&settings).await?;
    let app_state = transport::http::AppState {
        service: Arc::new(service),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
            }
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
