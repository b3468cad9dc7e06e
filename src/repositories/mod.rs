pub mod memory_vehicle_repository;
pub mod vehicle_query;
pub mod vehicle_repository;

pub use memory_vehicle_repository::InMemoryVehicleStore;
pub use vehicle_repository::{PgVehicleStore, VehicleRows, VehicleStore};
