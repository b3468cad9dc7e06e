//! Servicio de consultas y escritura de vehículos
//!
//! Traduce búsquedas y operaciones CRUD a llamadas sobre el `VehicleStore`,
//! aplicando siempre el filtro base (deleted + tipo) y las reglas de
//! validación de la entidad.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::dto::page::Page;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleSummaryView};
use crate::models::vehicle::VehicleRecord;
use crate::repositories::vehicle_query::{
    KeywordFilter, SearchColumn, SortSpec, VehicleFilter, VehicleQuery,
};
use crate::repositories::vehicle_repository::VehicleStore;
use crate::utils::errors::{vehicle_not_found, AppResult};

pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

/// Parámetros de búsqueda tal como llegan del cliente
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub keyword: Option<String>,
    /// Tokens `[campo, dirección]`
    pub sort: Vec<String>,
    pub column: String,
    pub offset: i64,
    pub limit: i64,
    pub used_only: bool,
    pub include_deleted: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keyword: None,
            sort: Vec::new(),
            column: "full".to_string(),
            offset: 0,
            limit: DEFAULT_SEARCH_LIMIT,
            used_only: true,
            include_deleted: false,
        }
    }
}

/// Resultado de un PATCH
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(VehicleRecord),
    /// El payload no traía ningún campo utilizable
    Unchanged,
}

#[derive(Clone)]
pub struct VehicleQueryService {
    store: Arc<dyn VehicleStore>,
    max_page_size: i64,
}

impl VehicleQueryService {
    pub fn new(store: Arc<dyn VehicleStore>, max_page_size: i64) -> Self {
        Self {
            store,
            max_page_size: max_page_size.max(1),
        }
    }

    /// Construir la consulta: filtro base, keyword sobre columnas permitidas,
    /// orden validado y paginación acotada.
    pub fn build_query(&self, params: &SearchParams) -> VehicleQuery {
        let column = SearchColumn::parse(&params.column).unwrap_or_else(|| {
            warn!(
                "Search column '{}' is not searchable, falling back to 'full'",
                params.column
            );
            SearchColumn::Full
        });

        VehicleQuery {
            filter: VehicleFilter::new(params.used_only, params.include_deleted),
            keyword: KeywordFilter::new(params.keyword.as_deref(), column),
            sort: SortSpec::from_tokens(params.sort.as_slice()),
            offset: params.offset.max(0),
            limit: params.limit.clamp(0, self.max_page_size),
        }
    }

    pub async fn search(&self, params: SearchParams) -> AppResult<Page<VehicleSummaryView>> {
        let query = self.build_query(&params);
        debug!("Searching vehicles: {:?}", query);

        let result = self.store.search(&query).await?;

        Ok(Page::of(result.rows, result.total_count, query.offset, query.limit)
            .map(VehicleSummaryView::from))
    }

    pub async fn get_by_id(
        &self,
        id: i64,
        used_only: bool,
        include_deleted: bool,
    ) -> AppResult<VehicleRecord> {
        let filter = VehicleFilter::new(used_only, include_deleted);
        self.store
            .find_by_id(id, &filter)
            .await?
            .ok_or_else(|| vehicle_not_found(id))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleRecord> {
        let vehicle = request.into_new_vehicle(Utc::now())?;
        vehicle.validate()?;

        let record = self.store.insert(vehicle).await?;
        info!("Vehicle #{} created ({})", record.id, record.vehicle_type);
        Ok(record)
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateVehicleRequest,
        used_only: bool,
    ) -> AppResult<UpdateOutcome> {
        let mut vehicle = self.get_by_id(id, used_only, false).await?;

        let changes = request.into_changes()?;
        if changes.is_empty() {
            debug!("Vehicle #{}: no updatable fields in payload", id);
            return Ok(UpdateOutcome::Unchanged);
        }

        for change in changes {
            debug!("Vehicle #{}: updating {}", id, change.field().name());
            change.apply(&mut vehicle);
        }
        vehicle.validate()?;

        let updated = self.store.update(&vehicle).await?;
        info!("Vehicle #{} updated", id);
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Soft delete: la fila queda con `deleted = true`
    pub async fn delete(&self, id: i64, used_only: bool) -> AppResult<()> {
        self.get_by_id(id, used_only, false).await?;

        if !self.store.soft_delete(id).await? {
            return Err(vehicle_not_found(id));
        }
        info!("Vehicle #{} deleted", id);
        Ok(())
    }
}
