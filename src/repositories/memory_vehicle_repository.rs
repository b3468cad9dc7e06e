//! Store en memoria
//!
//! Implementa el mismo contrato que `PgVehicleStore` sobre un BTreeMap.
//! Se usa con `STORE_BACKEND=memory` y en los tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::vehicle::{NewVehicle, VehicleRecord};
use crate::repositories::vehicle_query::{VehicleFilter, VehicleQuery};
use crate::repositories::vehicle_repository::{VehicleRows, VehicleStore};
use crate::utils::errors::{vehicle_not_found, AppResult};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, VehicleRecord>,
}

#[derive(Debug, Default)]
pub struct InMemoryVehicleStore {
    state: RwLock<MemoryState>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn search(&self, query: &VehicleQuery) -> AppResult<VehicleRows> {
        let state = self.state.read().await;

        let mut matching: Vec<&VehicleRecord> =
            state.rows.values().filter(|v| query.matches(v)).collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let total_count = matching.len() as i64;
        let rows = matching
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok(VehicleRows { rows, total_count })
    }

    async fn find_by_id(&self, id: i64, filter: &VehicleFilter) -> AppResult<Option<VehicleRecord>> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).filter(|v| filter.matches(v)).cloned())
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<VehicleRecord> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let record = vehicle.into_record(state.last_id);
        state.rows.insert(record.id, record.clone());

        tracing::debug!("Vehicle #{} inserted (memory)", record.id);
        Ok(record)
    }

    async fn update(&self, vehicle: &VehicleRecord) -> AppResult<VehicleRecord> {
        let mut state = self.state.write().await;
        let stored = state
            .rows
            .get_mut(&vehicle.id)
            .ok_or_else(|| vehicle_not_found(vehicle.id))?;

        stored.vehicle_type = vehicle.vehicle_type;
        stored.make = vehicle.make.clone();
        stored.model = vehicle.model.clone();
        stored.msrp = vehicle.msrp;
        stored.miles = vehicle.miles;
        stored.vin = vehicle.vin.clone();

        Ok(stored.clone())
    }

    async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.rows.get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.deleted = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
