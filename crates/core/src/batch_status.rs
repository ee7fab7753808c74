//! Batch lifecycle status derived from the expiration date.
//!
//! The status is never stored. It is recomputed on every read from the
//! stored expiration date and a supplied "today".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{parse_date, DateError};

/// Time-based lifecycle status of a production batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Valid,
    Expired,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Valid => "valid",
            BatchStatus::Expired => "expired",
        }
    }

    /// Banner shown on the public verification page.
    pub fn label(&self) -> &'static str {
        match self {
            BatchStatus::Valid => "Producto Vigente",
            BatchStatus::Expired => "Producto Vencido",
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, BatchStatus::Expired)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `true` iff the expiration day is strictly before `today`.
///
/// A batch expiring today stays valid through the end of the day.
pub fn is_expired(expiration: NaiveDate, today: NaiveDate) -> bool {
    expiration < today
}

pub fn evaluate(expiration: NaiveDate, today: NaiveDate) -> BatchStatus {
    if is_expired(expiration, today) {
        BatchStatus::Expired
    } else {
        BatchStatus::Valid
    }
}

/// Evaluate a stored expiration date string.
///
/// An unparseable date is an error, never a silent `Valid`.
pub fn evaluate_str(expiration: &str, today: NaiveDate) -> Result<BatchStatus, DateError> {
    parse_date(expiration).map(|date| evaluate(date, today))
}

/// The local calendar date right now.
///
/// The only place the wall clock is read; everything else takes `today`
/// as an argument.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
