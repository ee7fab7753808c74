//! Batch payload rules, including the production/expiration ordering.

use chrono::NaiveDate;

use crate::batch::{BatchInput, NewBatch};
use crate::dates::parse_date;

use super::rules::{
    require_text, FieldViolation, RuleType, ValidationErrors, FIELD_FECHA_PRODUCCION,
    FIELD_FECHA_VENCIMIENTO, FIELD_NUMERO_MAQUILLA, FIELD_VARIEDAD_ARROZ, MSG_DATE_ORDER,
    MSG_INVALID_DATE, MSG_NUMERO_REQUIRED, MSG_PRODUCCION_REQUIRED, MSG_VARIEDAD_REQUIRED,
    MSG_VENCIMIENTO_REQUIRED,
};

/// Validate batch form input.
///
/// Every field is checked independently. The ordering rule only runs once
/// both dates parse, and its violation is keyed to `fechaVencimiento`.
pub fn validate_batch(input: &BatchInput) -> Result<NewBatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let numero_maquilla = require_text(
        &mut errors,
        FIELD_NUMERO_MAQUILLA,
        &input.numero_maquilla,
        MSG_NUMERO_REQUIRED,
    );
    let variedad_arroz = require_text(
        &mut errors,
        FIELD_VARIEDAD_ARROZ,
        &input.variedad_arroz,
        MSG_VARIEDAD_REQUIRED,
    );
    let fecha_produccion = require_date(
        &mut errors,
        FIELD_FECHA_PRODUCCION,
        &input.fecha_produccion,
        MSG_PRODUCCION_REQUIRED,
    );
    let fecha_vencimiento = require_date(
        &mut errors,
        FIELD_FECHA_VENCIMIENTO,
        &input.fecha_vencimiento,
        MSG_VENCIMIENTO_REQUIRED,
    );

    if let (Some(produccion), Some(vencimiento)) = (fecha_produccion, fecha_vencimiento) {
        if vencimiento <= produccion {
            errors.add(FieldViolation::new(
                FIELD_FECHA_VENCIMIENTO,
                RuleType::DateOrder,
                MSG_DATE_ORDER,
            ));
        }
    }

    match (
        numero_maquilla,
        variedad_arroz,
        fecha_produccion,
        fecha_vencimiento,
    ) {
        (
            Some(numero_maquilla),
            Some(variedad_arroz),
            Some(fecha_produccion),
            Some(fecha_vencimiento),
        ) => errors.into_result(NewBatch {
            numero_maquilla,
            variedad_arroz,
            fecha_produccion,
            fecha_vencimiento,
        }),
        _ => Err(errors),
    }
}

/// A present, parseable date; `Required` when blank, `InvalidDate` otherwise.
fn require_date(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    required_message: &str,
) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        errors.add(FieldViolation::new(field, RuleType::Required, required_message));
        return None;
    }
    match parse_date(value) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(FieldViolation::new(field, RuleType::InvalidDate, MSG_INVALID_DATE));
            None
        }
    }
}
