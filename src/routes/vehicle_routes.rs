use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::dto::page::Page;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, ListVehiclesQuery, MessageResponse, UpdateVehicleRequest,
    VehicleSummaryView, DEFAULT_COLUMN, DEFAULT_LIST_LIMIT, DEFAULT_SORT, NO_DATA_UPDATED,
};
use crate::models::vehicle::VehicleRecord;
use crate::services::vehicle_query_service::{SearchParams, UpdateOutcome};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const VEHICLE_BASE_PATH: &str = "/api/v1/vehicle";

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route(VEHICLE_BASE_PATH, get(list_vehicles).post(create_vehicle))
        .route(
            &format!("{}/", VEHICLE_BASE_PATH),
            get(list_vehicles).post(create_vehicle),
        )
        .route(
            &format!("{}/:id", VEHICLE_BASE_PATH),
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
}

impl ListVehiclesQuery {
    /// Defaults del endpoint: sort "id,desc", offset 0, limit 10, column "full"
    pub fn into_search_params(self, used_only: bool) -> SearchParams {
        let sort = self.sort.unwrap_or_else(|| DEFAULT_SORT.to_string());
        SearchParams {
            keyword: self.keyword,
            sort: sort.split(',').map(|token| token.trim().to_string()).collect(),
            column: self.column.unwrap_or_else(|| DEFAULT_COLUMN.to_string()),
            offset: self.offset.unwrap_or(0),
            limit: self.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            used_only,
            include_deleted: false,
        }
    }
}

impl IntoResponse for UpdateOutcome {
    fn into_response(self) -> Response {
        match self {
            UpdateOutcome::Updated(vehicle) => (StatusCode::ACCEPTED, Json(vehicle)).into_response(),
            UpdateOutcome::Unchanged => (
                StatusCode::ACCEPTED,
                Json(MessageResponse::new(NO_DATA_UPDATED)),
            )
                .into_response(),
        }
    }
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<ListVehiclesQuery>, QueryRejection>,
) -> Result<Json<Page<VehicleSummaryView>>, AppError> {
    let Query(query) = query?;
    let params = query.into_search_params(state.used_only());
    let page = state.vehicles.search(params).await?;
    Ok(Json(page))
}

async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<VehicleRecord>, AppError> {
    let Path(id) = id?;
    let vehicle = state.vehicles.get_by_id(id, state.used_only(), false).await?;
    Ok(Json(vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    request: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VehicleRecord>), AppError> {
    let Json(request) = request?;
    let vehicle = state.vehicles.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<UpdateOutcome, AppError> {
    let Path(id) = id?;
    let Json(request) = request?;
    state.vehicles.update(id, request, state.used_only()).await
}

async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.vehicles.delete(id, state.used_only()).await?;
    Ok(StatusCode::NO_CONTENT)
}
