use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use vehicle_inventory::config::database::DatabaseConfig;
use vehicle_inventory::config::environment::{EnvironmentConfig, StoreBackend};
use vehicle_inventory::middleware::cors::cors_layer;
use vehicle_inventory::repositories::{InMemoryVehicleStore, PgVehicleStore, VehicleStore};
use vehicle_inventory::routes::{create_api_router, vehicle_routes::VEHICLE_BASE_PATH};
use vehicle_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Vehicle Inventory API");
    info!("========================");

    let store: Arc<dyn VehicleStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database = DatabaseConfig::new(config.database_url()?);
            info!("🗄️  Conectando a {}", database.masked_url());
            let pool = match database.create_pool().await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            Arc::new(PgVehicleStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("🧪 Usando store en memoria (los datos no persisten)");
            Arc::new(InMemoryVehicleStore::new())
        }
    };

    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️  CORS_ORIGINS vacío en {}: se aceptan todos los orígenes", config.environment);
    }
    let cors = cors_layer(&config.cors_origins);
    let addr: SocketAddr = config.server_url().parse()?;
    info!(
        "⚙️  used_only={} max_page_size={}",
        config.used_only, config.max_page_size
    );

    let app = create_api_router(AppState::new(config, store)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors),
    );

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health");
    info!("   GET    {}/ - Listar/buscar vehículos", VEHICLE_BASE_PATH);
    info!("   GET    {}/:id - Obtener vehículo", VEHICLE_BASE_PATH);
    info!("   POST   {} - Crear vehículo", VEHICLE_BASE_PATH);
    info!("   PATCH  {}/:id - Actualizar vehículo", VEHICLE_BASE_PATH);
    info!("   DELETE {}/:id - Eliminar vehículo", VEHICLE_BASE_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
