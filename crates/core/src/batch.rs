//! Production batch records and payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::batch_status::{self, BatchStatus};
use crate::dates::{self, DateError};
use crate::product::{deserialize_optional_path, Product};
use crate::types::BatchId;

/// A batch as returned by the external store, with its owning product
/// resolved by the store at read time.
///
/// Dates are kept exactly as exchanged (`YYYY-MM-DD` or ISO-8601) and
/// normalized on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBatch {
    pub id: BatchId,
    pub product: Product,
    pub numero_maquilla: String,
    pub variedad_arroz: String,
    pub fecha_produccion: String,
    pub fecha_vencimiento: String,
    /// Relative storage path or absolute URL of the verification image.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub qr_code_url: Option<String>,
}

impl ProductBatch {
    pub fn production_date(&self) -> Result<NaiveDate, DateError> {
        dates::parse_date(&self.fecha_produccion)
    }

    pub fn expiration_date(&self) -> Result<NaiveDate, DateError> {
        dates::parse_date(&self.fecha_vencimiento)
    }

    pub fn status(&self, today: NaiveDate) -> Result<BatchStatus, DateError> {
        batch_status::evaluate_str(&self.fecha_vencimiento, today)
    }
}

/// Raw batch form input, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchInput {
    pub numero_maquilla: String,
    pub variedad_arroz: String,
    pub fecha_produccion: String,
    pub fecha_vencimiento: String,
}

impl BatchInput {
    /// Pre-fill an edit form from a stored batch, dates as `YYYY-MM-DD`.
    pub fn from_batch(batch: &ProductBatch) -> Result<Self, DateError> {
        Ok(Self {
            numero_maquilla: batch.numero_maquilla.clone(),
            variedad_arroz: batch.variedad_arroz.clone(),
            fecha_produccion: dates::normalize_date(&batch.fecha_produccion)?,
            fecha_vencimiento: dates::normalize_date(&batch.fecha_vencimiento)?,
        })
    }
}

/// An accepted batch payload. `fecha_vencimiento > fecha_produccion` holds.
///
/// Only produced by [`crate::validation::validate_batch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatch {
    pub numero_maquilla: String,
    pub variedad_arroz: String,
    pub fecha_produccion: NaiveDate,
    pub fecha_vencimiento: NaiveDate,
}
