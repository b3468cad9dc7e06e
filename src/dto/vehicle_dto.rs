use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::vehicle::{FieldChange, NewVehicle, VehicleField, VehicleRecord, VehicleType};
use crate::utils::errors::{validation_error, AppError, AppResult};

pub const DEFAULT_SORT: &str = "id,desc";
pub const DEFAULT_COLUMN: &str = "full";
pub const DEFAULT_LIST_LIMIT: i64 = 10;
pub const NO_DATA_UPDATED: &str = "No Data has been updated";

// Request para crear un vehículo. Todos los campos son opcionales a nivel
// de JSON para poder responder con el primer campo requerido que falta.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreateVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub vin: Option<String>,
    pub model: Option<String>,
    pub make: Option<String>,
    pub msrp: Option<Decimal>,
    pub miles: Option<i32>,
    pub year: Option<i32>,
    #[serde(alias = "date")]
    pub date_added: Option<DateTime<Utc>>,
}

impl CreateVehicleRequest {
    fn is_supplied(&self, field: VehicleField) -> bool {
        match field {
            VehicleField::Type => has_text(&self.vehicle_type),
            VehicleField::Vin => has_text(&self.vin),
            VehicleField::Model => has_text(&self.model),
            VehicleField::Make => has_text(&self.make),
            VehicleField::Msrp => self.msrp.is_some(),
            VehicleField::Miles => self.miles.is_some(),
        }
    }

    /// Primer campo requerido ausente, en el orden type, vin, model, make, msrp, miles
    pub fn first_missing_field(&self) -> Option<VehicleField> {
        VehicleField::WRITABLE
            .into_iter()
            .find(|field| !self.is_supplied(*field))
    }

    /// Convertir a un NewVehicle. No valida invariantes de entidad.
    pub fn into_new_vehicle(self, now: DateTime<Utc>) -> AppResult<NewVehicle> {
        if let Some(field) = self.first_missing_field() {
            return Err(AppError::MissingField(field.name()));
        }

        let vehicle_type = parse_vehicle_type(&required(self.vehicle_type, VehicleField::Type)?)?;

        Ok(NewVehicle {
            vehicle_type,
            vin: required(self.vin, VehicleField::Vin)?,
            model: required(self.model, VehicleField::Model)?,
            make: required(self.make, VehicleField::Make)?,
            msrp: required(self.msrp, VehicleField::Msrp)?.round_dp(2),
            miles: required(self.miles, VehicleField::Miles)?,
            // Un año ausente se valida como 0 y falla la regla de rango
            year: self.year.unwrap_or_default(),
            date_added: self.date_added.unwrap_or(now),
        })
    }
}

// Request para actualizar un vehículo. Solo se consideran los campos
// whitelisted; el resto del payload se ignora. Un campo vacío (null, texto
// en blanco, "0" o un número igual a cero) cuenta como no enviado.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub vin: Option<String>,
    pub model: Option<String>,
    pub make: Option<String>,
    pub msrp: Option<Decimal>,
    pub miles: Option<i32>,
}

impl UpdateVehicleRequest {
    /// Cambios tipados de los campos presentes y no vacíos
    pub fn into_changes(self) -> AppResult<Vec<FieldChange>> {
        let mut changes = Vec::new();

        if let Some(raw) = non_blank(self.vehicle_type) {
            changes.push(FieldChange::Type(parse_vehicle_type(&raw)?));
        }
        if let Some(vin) = non_blank(self.vin) {
            changes.push(FieldChange::Vin(vin));
        }
        if let Some(model) = non_blank(self.model) {
            changes.push(FieldChange::Model(model));
        }
        if let Some(make) = non_blank(self.make) {
            changes.push(FieldChange::Make(make));
        }
        if let Some(msrp) = self.msrp.filter(|msrp| !msrp.is_zero()) {
            changes.push(FieldChange::Msrp(msrp));
        }
        if let Some(miles) = self.miles.filter(|miles| *miles != 0) {
            changes.push(FieldChange::Miles(miles));
        }

        Ok(changes)
    }
}

// Proyección de listado: sin year ni deleted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleSummaryView {
    pub id: i64,
    pub model: String,
    pub make: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub msrp: Decimal,
    pub vin: String,
    pub miles: i32,
    pub date_added: DateTime<Utc>,
}

impl From<VehicleRecord> for VehicleSummaryView {
    fn from(vehicle: VehicleRecord) -> Self {
        Self {
            id: vehicle.id,
            model: vehicle.model,
            make: vehicle.make,
            vehicle_type: vehicle.vehicle_type,
            msrp: vehicle.msrp,
            vin: vehicle.vin,
            miles: vehicle.miles,
            date_added: vehicle.date_added,
        }
    }
}

// Query params del listado
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListVehiclesQuery {
    pub keyword: Option<String>,
    pub sort: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub column: Option<String>,
}

// Response informativa
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "0"
    })
}

fn required<T>(value: Option<T>, field: VehicleField) -> AppResult<T> {
    value.ok_or(AppError::MissingField(field.name()))
}

fn parse_vehicle_type(raw: &str) -> AppResult<VehicleType> {
    raw.parse::<VehicleType>()
        .map_err(|message| validation_error("type", message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_request() -> CreateVehicleRequest {
        serde_json::from_value(json!({
            "type": "used",
            "vin": "1HGCM82633A004352",
            "model": "Civic",
            "make": "Honda",
            "msrp": 21500.456,
            "miles": 1200,
            "year": 2019
        }))
        .unwrap()
    }

    #[test]
    fn test_each_required_field_is_checked_on_its_own() {
        let mut request = full_request();
        assert_eq!(request.first_missing_field(), None);

        request.miles = None;
        assert_eq!(request.first_missing_field(), Some(VehicleField::Miles));

        request.model = Some("   ".to_string());
        assert_eq!(request.first_missing_field(), Some(VehicleField::Model));

        request.vehicle_type = None;
        assert_eq!(request.first_missing_field(), Some(VehicleField::Type));
    }

    #[test]
    fn test_into_new_vehicle_rounds_msrp_and_defaults_date() {
        let now = Utc::now();
        let vehicle = full_request().into_new_vehicle(now).unwrap();
        assert_eq!(vehicle.vehicle_type, VehicleType::Used);
        assert_eq!(vehicle.msrp, Decimal::new(2150046, 2));
        assert_eq!(vehicle.date_added, now);
        assert_eq!(vehicle.year, 2019);
    }

    #[test]
    fn test_missing_field_error_names_the_field() {
        let mut request = full_request();
        request.vin = None;
        match request.into_new_vehicle(Utc::now()) {
            Err(AppError::MissingField(field)) => assert_eq!(field, "vin"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_a_validation_error() {
        let mut request = full_request();
        request.vehicle_type = Some("salvage".to_string());
        assert!(matches!(
            request.into_new_vehicle(Utc::now()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_update_ignores_blank_and_unknown_fields() {
        let request: UpdateVehicleRequest = serde_json::from_value(json!({
            "make": "",
            "model": "Accord",
            "year": 1950,
            "deleted": true
        }))
        .unwrap();
        let changes = request.into_changes().unwrap();
        assert_eq!(changes, vec![FieldChange::Model("Accord".to_string())]);
    }

    #[test]
    fn test_zero_values_count_as_empty() {
        let request: UpdateVehicleRequest = serde_json::from_value(json!({
            "miles": 0,
            "msrp": 0.0,
            "vin": "0",
            "type": " 0 "
        }))
        .unwrap();
        assert!(request.into_changes().unwrap().is_empty());

        let request: UpdateVehicleRequest =
            serde_json::from_value(json!({ "miles": 10, "msrp": "0.00" })).unwrap();
        assert_eq!(request.into_changes().unwrap(), vec![FieldChange::Miles(10)]);
    }

    #[test]
    fn test_empty_update_has_no_changes() {
        let request: UpdateVehicleRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.into_changes().unwrap().is_empty());
    }

    #[test]
    fn test_summary_drops_year_and_deleted() {
        let record = full_request()
            .into_new_vehicle(Utc::now())
            .unwrap()
            .into_record(3);
        let json = serde_json::to_value(VehicleSummaryView::from(record)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type"], "used");
        assert!(json.get("year").is_none());
        assert!(json.get("deleted").is_none());
    }
}
