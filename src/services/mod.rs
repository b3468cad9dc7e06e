pub mod vehicle_query_service;

pub use vehicle_query_service::{SearchParams, UpdateOutcome, VehicleQueryService};
