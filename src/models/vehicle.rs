//! Modelo de Vehicle
//!
//! Este módulo contiene el struct VehicleRecord, el tipo NEW/USED y el mapeo
//! explícito de campos actualizables. Mapea a la tabla `vehicles`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::validation::{validate_at_most, validate_not_empty, validate_positive};

/// Mayor valor que cabe en la columna `msrp NUMERIC(20, 2)`
pub const MAX_MSRP: Decimal = Decimal::from_parts(0x630F_FFFF, 0x6BC7_5E2D, 0x5, false, 2);

/// Tipo del vehículo - mapea al ENUM vehicle_type
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    New,
    Used,
}

impl VehicleType {
    /// Tipo visible según el parámetro `used_only`
    pub fn from_used_only(used_only: bool) -> Self {
        if used_only {
            VehicleType::Used
        } else {
            VehicleType::New
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::New => "new",
            VehicleType::Used => "used",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(VehicleType::New),
            "used" => Ok(VehicleType::Used),
            other => Err(format!("'{}' is not a valid vehicle type (new, used)", other)),
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VehicleRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub msrp: Decimal,
    pub year: i32,
    pub miles: i32,
    pub vin: String,
    pub date_added: DateTime<Utc>,
    pub deleted: bool,
}

/// Vehículo validado, listo para insertar. El id lo asigna el store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub msrp: Decimal,
    pub year: i32,
    pub miles: i32,
    pub vin: String,
    pub date_added: DateTime<Utc>,
}

impl NewVehicle {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_attributes(&self.make, &self.model, &self.msrp, self.year, self.miles, &self.vin)
    }

    /// Construye el registro persistido a partir del id asignado
    pub fn into_record(self, id: i64) -> VehicleRecord {
        VehicleRecord {
            id,
            vehicle_type: self.vehicle_type,
            make: self.make,
            model: self.model,
            msrp: self.msrp,
            year: self.year,
            miles: self.miles,
            vin: self.vin,
            date_added: self.date_added,
            deleted: false,
        }
    }
}

impl VehicleRecord {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_attributes(&self.make, &self.model, &self.msrp, self.year, self.miles, &self.vin)
    }
}

/// Vista de validación sobre los atributos de un vehículo.
/// Los límites de texto siguen las columnas de `vehicles`.
#[derive(Debug, Validate)]
struct VehicleAttributes<'a> {
    #[validate(
        custom = "validate_not_empty",
        length(max = 255, message = "This value is too long. It should have 255 characters or less.")
    )]
    make: &'a str,

    #[validate(
        custom = "validate_not_empty",
        length(max = 255, message = "This value is too long. It should have 255 characters or less.")
    )]
    model: &'a str,

    #[validate(custom = "validate_msrp")]
    msrp: Decimal,

    #[validate(range(min = 1900, max = 9999, message = "This value should be between 1900 and 9999."))]
    year: i32,

    #[validate(range(min = 0, message = "This value should be either positive or zero."))]
    miles: i32,

    #[validate(
        custom = "validate_not_empty",
        length(min = 17, max = 20, message = "This value should have between 17 and 20 characters.")
    )]
    vin: &'a str,
}

fn validate_msrp(msrp: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*msrp)?;
    validate_at_most(*msrp, MAX_MSRP)
}

/// Reglas de entidad. Devuelve todas las violaciones, no solo la primera.
fn validate_attributes(
    make: &str,
    model: &str,
    msrp: &Decimal,
    year: i32,
    miles: i32,
    vin: &str,
) -> Result<(), ValidationErrors> {
    VehicleAttributes {
        make,
        model,
        msrp: *msrp,
        year,
        miles,
        vin,
    }
    .validate()
}

/// Campos que se pueden escribir vía create/update, en el orden en que se
/// comprueba su presencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleField {
    Type,
    Vin,
    Model,
    Make,
    Msrp,
    Miles,
}

impl VehicleField {
    pub const WRITABLE: [VehicleField; 6] = [
        VehicleField::Type,
        VehicleField::Vin,
        VehicleField::Model,
        VehicleField::Make,
        VehicleField::Msrp,
        VehicleField::Miles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VehicleField::Type => "type",
            VehicleField::Vin => "vin",
            VehicleField::Model => "model",
            VehicleField::Make => "make",
            VehicleField::Msrp => "msrp",
            VehicleField::Miles => "miles",
        }
    }
}

/// Cambio tipado sobre un campo actualizable
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Type(VehicleType),
    Vin(String),
    Model(String),
    Make(String),
    Msrp(Decimal),
    Miles(i32),
}

impl FieldChange {
    pub fn field(&self) -> VehicleField {
        match self {
            FieldChange::Type(_) => VehicleField::Type,
            FieldChange::Vin(_) => VehicleField::Vin,
            FieldChange::Model(_) => VehicleField::Model,
            FieldChange::Make(_) => VehicleField::Make,
            FieldChange::Msrp(_) => VehicleField::Msrp,
            FieldChange::Miles(_) => VehicleField::Miles,
        }
    }

    pub fn apply(self, record: &mut VehicleRecord) {
        match self {
            FieldChange::Type(value) => record.vehicle_type = value,
            FieldChange::Vin(value) => record.vin = value,
            FieldChange::Model(value) => record.model = value,
            FieldChange::Make(value) => record.make = value,
            FieldChange::Msrp(value) => record.msrp = value.round_dp(2),
            FieldChange::Miles(value) => record.miles = value,
        }
    }
}
