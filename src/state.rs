//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::vehicle_repository::VehicleStore;
use crate::services::vehicle_query_service::VehicleQueryService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: VehicleQueryService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn VehicleStore>) -> Self {
        let vehicles = VehicleQueryService::new(store, config.max_page_size);
        Self { config, vehicles }
    }

    /// Parámetro `app.used_only` que aplican todos los endpoints
    pub fn used_only(&self) -> bool {
        self.config.used_only
    }
}
