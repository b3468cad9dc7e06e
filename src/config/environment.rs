//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto salvo `DATABASE_URL`, que
//! solo es obligatoria con el backend postgres.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

use crate::services::vehicle_query_service::DEFAULT_MAX_PAGE_SIZE;

/// Backend de almacenamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("STORE_BACKEND '{}' must be 'postgres' or 'memory'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: Level,
    pub cors_origins: Vec<String>,
    /// `app.used_only`: los endpoints ven vehículos USED (true) o NEW (false)
    pub used_only: bool,
    pub max_page_size: i64,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            log_level: Level::INFO,
            cors_origins: Vec::new(),
            used_only: true,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            store_backend: StoreBackend::Postgres,
            database_url: None,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} must be valid: {}", name, e)),
        _ => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno (después de `dotenv()`)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
            used_only: parse_var("USED_ONLY", defaults.used_only)?,
            max_page_size: parse_var("MAX_PAGE_SIZE", defaults.max_page_size)?,
            store_backend: env::var("STORE_BACKEND")
                .ok()
                .map(|raw| raw.parse())
                .transpose()?
                .unwrap_or(defaults.store_backend),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
        };

        if config.max_page_size < 1 {
            return Err(anyhow!("MAX_PAGE_SIZE must be at least 1"));
        }
        if config.store_backend == StoreBackend::Postgres && config.database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when STORE_BACKEND=postgres"));
        }

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set in environment variables")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
