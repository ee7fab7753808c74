use maquila_core::dates::DateError;
use maquila_core::error::CoreError;
use maquila_core::validation::{FieldViolation, ValidationErrors};

/// Shown when a lookup finds no record.
pub const MSG_NOT_FOUND: &str = "Producto no encontrado";

/// Shown for network and backend failures. Retrying is left to the user.
pub const MSG_RETRY: &str = "No se pudo conectar con el servidor. Intenta de nuevo.";

/// Shown when a stored record carries a date that cannot be read.
pub const MSG_INVALID_RECORD: &str = "El registro contiene una fecha no válida";

/// Errors from the catalog client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A domain-level error: not found, rejected input, unreadable date.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured origin cannot carry request paths.
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The backend returned a non-2xx status other than 404.
    #[error("Catalog API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Convenience alias for client return values.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ClientError::Core(CoreError::NotFound {
            entity,
            id: id.to_string(),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Core(CoreError::NotFound { .. }))
    }

    /// Field-level violations, when the failure is a rejected payload.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Core(CoreError::InvalidFields(errors)) => Some(errors),
            _ => None,
        }
    }

    /// The message to show the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Core(CoreError::NotFound { .. }) => MSG_NOT_FOUND.to_string(),
            ClientError::Core(CoreError::InvalidFields(errors)) => errors
                .iter()
                .map(|v| format!("{}: {}", v.field, v.message))
                .collect::<Vec<_>>()
                .join("\n"),
            ClientError::Core(CoreError::InvalidDate(_)) => MSG_INVALID_RECORD.to_string(),
            ClientError::InvalidUrl { .. } => self.to_string(),
            ClientError::Request(_) | ClientError::Api { .. } => MSG_RETRY.to_string(),
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Core(CoreError::InvalidFields(errors))
    }
}

impl From<FieldViolation> for ClientError {
    fn from(violation: FieldViolation) -> Self {
        ValidationErrors::from(violation).into()
    }
}

impl From<DateError> for ClientError {
    fn from(err: DateError) -> Self {
        ClientError::Core(CoreError::InvalidDate(err))
    }
}
