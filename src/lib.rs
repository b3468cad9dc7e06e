//! API REST de inventario de vehículos
//!
//! Listado con búsqueda, orden y paginación, consulta por id, alta,
//! actualización parcial y borrado lógico sobre PostgreSQL.

pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
