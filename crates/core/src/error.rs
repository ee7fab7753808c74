use crate::dates::DateError;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    InvalidFields(#[from] ValidationErrors),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] DateError),
}
