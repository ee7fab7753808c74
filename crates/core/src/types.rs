/// Product primary keys are integers assigned by the external store.
pub type DbId = i64;

/// Batch identifiers are opaque strings assigned by the external store.
pub type BatchId = String;
