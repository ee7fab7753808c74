//! Product payload rules.

use crate::product::{NewProduct, ProductInput};

use super::rules::{
    require_text, ValidationErrors, FIELD_NAME, FIELD_REGISTRO_SANITARIO, MSG_NAME_REQUIRED,
    MSG_REGISTRO_REQUIRED,
};

/// Validate product form input.
///
/// `name` and `registroSanitario` must be non-empty after trimming. Both are
/// checked independently, so a payload missing both reports two errors.
/// The accepted payload carries no image; attachments go through
/// [`super::validate_image`].
pub fn validate_product(input: &ProductInput) -> Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = require_text(&mut errors, FIELD_NAME, &input.name, MSG_NAME_REQUIRED);
    let registro_sanitario = require_text(
        &mut errors,
        FIELD_REGISTRO_SANITARIO,
        &input.registro_sanitario,
        MSG_REGISTRO_REQUIRED,
    );

    match (name, registro_sanitario) {
        (Some(name), Some(registro_sanitario)) => errors.into_result(NewProduct {
            name,
            registro_sanitario,
            image: None,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RuleType;

    fn input(name: &str, registro: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            registro_sanitario: registro.to_string(),
        }
    }

    #[test]
    fn accepts_and_trims() {
        let product = validate_product(&input("  Arroz Premium ", " RS-2024-001")).unwrap();
        assert_eq!(product.name, "Arroz Premium");
        assert_eq!(product.registro_sanitario, "RS-2024-001");
        assert_eq!(product.image, None);
    }

    #[test]
    fn empty_name_yields_one_error() {
        let errors = validate_product(&input("", "RS-1")).unwrap_err();
        assert_eq!(errors.len(), 1);
        let violation = errors.get(FIELD_NAME).unwrap();
        assert_eq!(violation.rule_type, RuleType::Required);
        assert_eq!(violation.message, MSG_NAME_REQUIRED);
    }

    #[test]
    fn whitespace_name_is_empty() {
        let errors = validate_product(&input("   ", "RS-1")).unwrap_err();
        assert!(errors.contains(FIELD_NAME));
    }

    #[test]
    fn missing_both_fields_yields_two_errors() {
        let errors = validate_product(&ProductInput::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(FIELD_NAME));
        assert!(errors.contains(FIELD_REGISTRO_SANITARIO));
    }
}
