use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::vehicle::{NewVehicle, VehicleRecord};
use crate::repositories::vehicle_query::{SortField, VehicleFilter, VehicleQuery};
use crate::utils::errors::{vehicle_not_found, AppResult};

const VEHICLE_COLUMNS: &str =
    "id, vehicle_type, make, model, msrp, year, miles, vin, date_added, deleted";

/// Filas de una página más el total sin paginar
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRows {
    pub rows: Vec<VehicleRecord>,
    pub total_count: i64,
}

/// Acceso al almacenamiento de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn search(&self, query: &VehicleQuery) -> AppResult<VehicleRows>;

    async fn find_by_id(&self, id: i64, filter: &VehicleFilter) -> AppResult<Option<VehicleRecord>>;

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<VehicleRecord>;

    /// Persistir los campos escribibles de un registro existente
    async fn update(&self, vehicle: &VehicleRecord) -> AppResult<VehicleRecord>;

    /// Marcar como borrado. `false` si no había una fila activa con ese id.
    async fn soft_delete(&self, id: i64) -> AppResult<bool>;
}

/// Fila de una página con el total de la consulta sin paginar
#[derive(Debug, FromRow)]
struct CountedVehicleRow {
    #[sqlx(flatten)]
    vehicle: VehicleRecord,
    total_count: i64,
}

pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_conditions(builder: &mut QueryBuilder<'static, Postgres>, query: &VehicleQuery) {
    builder
        .push(" WHERE deleted = ")
        .push_bind(query.filter.deleted)
        .push(" AND vehicle_type = ")
        .push_bind(query.filter.vehicle_type());

    if let Some(keyword) = &query.keyword {
        let pattern = keyword.like_pattern();
        builder.push(" AND (");
        for (i, column) in keyword.column.columns().iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(*column).push(" ILIKE ").push_bind(pattern.clone());
        }
        builder.push(")");
    }
}

pub(crate) fn build_select(query: &VehicleQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {}, COUNT(*) OVER() AS total_count FROM vehicles",
        VEHICLE_COLUMNS
    ));
    push_conditions(&mut builder, query);

    builder
        .push(" ORDER BY ")
        .push(query.sort.field.column())
        .push(" ")
        .push(query.sort.direction.sql());
    if query.sort.field != SortField::Id {
        builder.push(", id DESC");
    }

    builder
        .push(" LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset);
    builder
}

pub(crate) fn build_count(query: &VehicleQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM vehicles");
    push_conditions(&mut builder, query);
    builder
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn search(&self, query: &VehicleQuery) -> AppResult<VehicleRows> {
        // Filas y total salen de la misma sentencia, sobre el mismo snapshot
        let mut select = build_select(query);
        let counted = select
            .build_query_as::<CountedVehicleRow>()
            .fetch_all(&self.pool)
            .await?;

        let total_count = match counted.first() {
            Some(row) => row.total_count,
            // Página vacía: el total hay que pedirlo aparte
            None => {
                let mut count = build_count(query);
                let (total_count,): (i64,) = count
                    .build_query_as()
                    .fetch_one(&self.pool)
                    .await?;
                total_count
            }
        };

        let rows = counted.into_iter().map(|row| row.vehicle).collect();
        Ok(VehicleRows { rows, total_count })
    }

    async fn find_by_id(&self, id: i64, filter: &VehicleFilter) -> AppResult<Option<VehicleRecord>> {
        let vehicle = sqlx::query_as::<_, VehicleRecord>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1 AND deleted = $2 AND vehicle_type = $3",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .bind(filter.deleted)
        .bind(filter.vehicle_type())
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<VehicleRecord> {
        let vehicle = sqlx::query_as::<_, VehicleRecord>(&format!(
            r#"
            INSERT INTO vehicles (vehicle_type, make, model, msrp, year, miles, vin, date_added, deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.vehicle_type)
        .bind(vehicle.make)
        .bind(vehicle.model)
        .bind(vehicle.msrp)
        .bind(vehicle.year)
        .bind(vehicle.miles)
        .bind(vehicle.vin)
        .bind(vehicle.date_added)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Vehicle #{} inserted", vehicle.id);
        Ok(vehicle)
    }

    async fn update(&self, vehicle: &VehicleRecord) -> AppResult<VehicleRecord> {
        let updated = sqlx::query_as::<_, VehicleRecord>(&format!(
            r#"
            UPDATE vehicles
            SET vehicle_type = $2, make = $3, model = $4, msrp = $5, miles = $6, vin = $7
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(vehicle.vehicle_type)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.msrp)
        .bind(vehicle.miles)
        .bind(&vehicle.vin)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| vehicle_not_found(vehicle.id))
    }

    async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE vehicles SET deleted = TRUE WHERE id = $1 AND deleted = FALSE")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
