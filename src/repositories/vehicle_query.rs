//! Consultas de vehículos
//!
//! Filtros, keyword, orden y paginación expresados como valores tipados.
//! Los nombres de columna salen siempre de estos enums, nunca del input
//! del cliente.

use std::cmp::Ordering;

use crate::models::vehicle::{VehicleRecord, VehicleType};

/// Filtro base: siempre se aplica, con o sin keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleFilter {
    pub used_only: bool,
    /// Se comparan filas cuyo flag `deleted` es igual a este valor
    pub deleted: bool,
}

impl VehicleFilter {
    pub fn new(used_only: bool, include_deleted: bool) -> Self {
        Self {
            used_only,
            deleted: include_deleted,
        }
    }

    pub fn vehicle_type(&self) -> VehicleType {
        VehicleType::from_used_only(self.used_only)
    }

    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        vehicle.deleted == self.deleted && vehicle.vehicle_type == self.vehicle_type()
    }
}

impl Default for VehicleFilter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// Columnas de texto donde se permite buscar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchColumn {
    /// make OR model
    Full,
    Make,
    Model,
    Vin,
}

impl SearchColumn {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full" => Some(SearchColumn::Full),
            "make" => Some(SearchColumn::Make),
            "model" => Some(SearchColumn::Model),
            "vin" => Some(SearchColumn::Vin),
            _ => None,
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            SearchColumn::Full => &["model", "make"],
            SearchColumn::Make => &["make"],
            SearchColumn::Model => &["model"],
            SearchColumn::Vin => &["vin"],
        }
    }

    fn values<'a>(&self, vehicle: &'a VehicleRecord) -> Vec<&'a str> {
        match self {
            SearchColumn::Full => vec![vehicle.model.as_str(), vehicle.make.as_str()],
            SearchColumn::Make => vec![vehicle.make.as_str()],
            SearchColumn::Model => vec![vehicle.model.as_str()],
            SearchColumn::Vin => vec![vehicle.vin.as_str()],
        }
    }
}

/// Búsqueda por substring, sin distinguir mayúsculas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter {
    pub column: SearchColumn,
    pub keyword: String,
}

impl KeywordFilter {
    /// None cuando el keyword está ausente o vacío
    pub fn new(keyword: Option<&str>, column: SearchColumn) -> Option<Self> {
        let keyword = keyword?.trim();
        if keyword.is_empty() {
            return None;
        }
        Some(Self {
            column,
            keyword: keyword.to_string(),
        })
    }

    /// Patrón para ILIKE con los comodines del keyword escapados
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.keyword.len() + 2);
        pattern.push('%');
        for c in self.keyword.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        let needle = self.keyword.to_lowercase();
        self.column
            .values(vehicle)
            .iter()
            .any(|value| value.to_lowercase().contains(&needle))
    }
}

/// Campos por los que se permite ordenar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Type,
    Make,
    Model,
    Msrp,
    Year,
    Miles,
    Vin,
    DateAdded,
}

impl SortField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Some(SortField::Id),
            "type" => Some(SortField::Type),
            "make" => Some(SortField::Make),
            "model" => Some(SortField::Model),
            "msrp" => Some(SortField::Msrp),
            "year" => Some(SortField::Year),
            "miles" => Some(SortField::Miles),
            "vin" => Some(SortField::Vin),
            "date_added" => Some(SortField::DateAdded),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Type => "vehicle_type",
            SortField::Make => "make",
            SortField::Model => "model",
            SortField::Msrp => "msrp",
            SortField::Year => "year",
            SortField::Miles => "miles",
            SortField::Vin => "vin",
            SortField::DateAdded => "date_added",
        }
    }

    fn compare(&self, a: &VehicleRecord, b: &VehicleRecord) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Type => a.vehicle_type.cmp(&b.vehicle_type),
            SortField::Make => a.make.cmp(&b.make),
            SortField::Model => a.model.cmp(&b.model),
            SortField::Msrp => a.msrp.cmp(&b.msrp),
            SortField::Year => a.year.cmp(&b.year),
            SortField::Miles => a.miles.cmp(&b.miles),
            SortField::Vin => a.vin.cmp(&b.vin),
            SortField::DateAdded => a.date_added.cmp(&b.date_added),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(SortDirection::Asc),
            "DESC" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Id,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Exactamente dos tokens `[campo, dirección]`; cualquier otra forma
    /// devuelve el orden por defecto (id DESC).
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        match tokens {
            [field, direction] => {
                match (SortField::parse(field.as_ref()), SortDirection::parse(direction.as_ref())) {
                    (Some(field), Some(direction)) => Self { field, direction },
                    _ => Self::default(),
                }
            }
            _ => Self::default(),
        }
    }

    /// Orden total: desempate por id descendente
    pub fn compare(&self, a: &VehicleRecord, b: &VehicleRecord) -> Ordering {
        let primary = match self.direction {
            SortDirection::Asc => self.field.compare(a, b),
            SortDirection::Desc => self.field.compare(b, a),
        };
        primary.then_with(|| b.id.cmp(&a.id))
    }
}

/// Consulta completa que recibe el store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuery {
    pub filter: VehicleFilter,
    pub keyword: Option<KeywordFilter>,
    pub sort: SortSpec,
    pub offset: i64,
    pub limit: i64,
}

impl VehicleQuery {
    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        self.filter.matches(vehicle)
            && self
                .keyword
                .as_ref()
                .map_or(true, |keyword| keyword.matches(vehicle))
    }
}
