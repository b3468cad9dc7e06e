//! Utilidades de validación
//!
//! Reglas que `validator` no expresa con sus atributos: texto no vacío tras
//! recortar espacios y cotas sobre `Decimal`. Se usan como `custom` en los
//! `#[derive(Validate)]` de los modelos.

use std::borrow::Cow;

use serde::Serialize;
use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        error.message = Some(Cow::from("This value should not be blank."));
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        error.message = Some(Cow::from("This value should be positive."));
        return Err(error);
    }
    Ok(())
}

/// Validar una cota superior inclusiva
pub fn validate_at_most<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    max: T,
) -> Result<(), ValidationError> {
    if value > max {
        let mut error = ValidationError::new("range");
        error.add_param("max".into(), &max);
        error.add_param("value".into(), &value);
        error.message = Some(Cow::from(format!(
            "This value should be less than or equal to {}.",
            max
        )));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Honda").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(Decimal::new(1, 2)).is_ok());
        assert!(validate_positive(Decimal::ZERO).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_at_most() {
        let max = Decimal::new(10000, 2);
        assert!(validate_at_most(Decimal::new(10000, 2), max).is_ok());
        let error = validate_at_most(Decimal::new(10001, 2), max).unwrap_err();
        assert_eq!(error.code, "range");
    }
}
