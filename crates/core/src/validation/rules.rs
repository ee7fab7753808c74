//! Validation rule and result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field keys
// ---------------------------------------------------------------------------

// Keys match the wire field names so a UI can highlight the right input.
pub const FIELD_NAME: &str = "name";
pub const FIELD_REGISTRO_SANITARIO: &str = "registroSanitario";
pub const FIELD_IMAGE: &str = "image";
pub const FIELD_NUMERO_MAQUILLA: &str = "numeroMaquilla";
pub const FIELD_VARIEDAD_ARROZ: &str = "variedadArroz";
pub const FIELD_FECHA_PRODUCCION: &str = "fechaProduccion";
pub const FIELD_FECHA_VENCIMIENTO: &str = "fechaVencimiento";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NAME_REQUIRED: &str = "El nombre es requerido";
pub const MSG_REGISTRO_REQUIRED: &str = "El registro sanitario es requerido";
pub const MSG_NUMERO_REQUIRED: &str = "El número de maquilla es requerido";
pub const MSG_VARIEDAD_REQUIRED: &str = "La variedad de arroz es requerida";
pub const MSG_PRODUCCION_REQUIRED: &str = "La fecha de producción es requerida";
pub const MSG_VENCIMIENTO_REQUIRED: &str = "La fecha de vencimiento es requerida";
pub const MSG_INVALID_DATE: &str = "La fecha no es válida";
pub const MSG_DATE_ORDER: &str =
    "La fecha de vencimiento debe ser posterior a la fecha de producción";
pub const MSG_IMAGE_TYPE: &str = "Solo se permiten imágenes JPG, PNG, GIF o WebP";
pub const MSG_IMAGE_SIZE: &str = "La imagen no debe exceder 5MB";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which rule a field violated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Required,
    InvalidDate,
    DateOrder,
    ImageType,
    ImageSize,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: RuleType,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, rule_type: RuleType, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            rule_type,
            message: message.into(),
        }
    }
}

/// Field-keyed violations collected from one payload.
///
/// Holds at most one violation per field; the first rule a field fails is
/// the one reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed for {} field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: BTreeMap<String, FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unless its field already has one.
    pub fn add(&mut self, violation: FieldViolation) {
        self.fields
            .entry(violation.field.clone())
            .or_insert(violation);
    }

    pub fn get(&self, field: &str) -> Option<&FieldViolation> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Violations in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.fields.values()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<FieldViolation> for ValidationErrors {
    fn from(violation: FieldViolation) -> Self {
        let mut errors = Self::new();
        errors.add(violation);
        errors
    }
}

/// Trimmed text, or a `Required` violation when nothing is left.
pub fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    message: &str,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(FieldViolation::new(field, RuleType::Required, message));
        None
    } else {
        Some(trimmed.to_string())
    }
}
