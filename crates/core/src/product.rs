//! Product records and payloads.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::DbId;

/// A product as returned by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub registro_sanitario: String,
    /// Relative storage path or absolute URL. `None` means no image.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

/// Raw product form input, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub name: String,
    pub registro_sanitario: String,
}

/// An accepted product payload, ready to send to the store.
///
/// Only produced by [`crate::validation::validate_product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub registro_sanitario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NewProduct {
    /// Carry the existing image reference for an update that does not
    /// attach a new image, so the store does not clear it.
    pub fn preserving_image(mut self, existing: &Product) -> Self {
        if self.image.is_none() {
            self.image = existing.image.clone();
        }
        self
    }
}

impl Product {
    /// The record an update produces: text fields replaced, image replaced
    /// only when a new one was stored.
    pub fn apply_update(&self, update: NewProduct, new_image: Option<String>) -> Product {
        Product {
            id: self.id,
            name: update.name,
            registro_sanitario: update.registro_sanitario,
            image: new_image.or(update.image).or_else(|| self.image.clone()),
        }
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            registro_sanitario: product.registro_sanitario.clone(),
        }
    }
}

/// `null`, missing and blank paths all mean "no file".
pub(crate) fn deserialize_optional_path<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|path| !path.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(image: Option<&str>) -> Product {
        Product {
            id: 3,
            name: "Arroz Integral".to_string(),
            registro_sanitario: "RS-2024-001".to_string(),
            image: image.map(str::to_string),
        }
    }

    fn update() -> NewProduct {
        NewProduct {
            name: "Arroz Extra".to_string(),
            registro_sanitario: "RS-2024-002".to_string(),
            image: None,
        }
    }

    #[test]
    fn deserializes_camel_case_wire_shape() {
        let p: Product = serde_json::from_value(json!({
            "id": 1,
            "name": "Arroz",
            "registroSanitario": "RS-1",
            "image": "uploads/a.png"
        }))
        .unwrap();
        assert_eq!(p.registro_sanitario, "RS-1");
        assert_eq!(p.image.as_deref(), Some("uploads/a.png"));
    }

    #[test]
    fn blank_null_or_missing_image_is_absent() {
        for body in [
            json!({"id": 1, "name": "a", "registroSanitario": "b", "image": ""}),
            json!({"id": 1, "name": "a", "registroSanitario": "b", "image": null}),
            json!({"id": 1, "name": "a", "registroSanitario": "b"}),
        ] {
            let p: Product = serde_json::from_value(body).unwrap();
            assert_eq!(p.image, None);
        }
    }

    #[test]
    fn update_without_new_image_keeps_existing() {
        let existing = product(Some("uploads/old.png"));
        let payload = update().preserving_image(&existing);
        assert_eq!(payload.image.as_deref(), Some("uploads/old.png"));

        let updated = existing.apply_update(update(), None);
        assert_eq!(updated.name, "Arroz Extra");
        assert_eq!(updated.image.as_deref(), Some("uploads/old.png"));
    }

    #[test]
    fn update_with_new_image_replaces_it() {
        let existing = product(Some("uploads/old.png"));
        let updated = existing.apply_update(update(), Some("uploads/new.png".to_string()));
        assert_eq!(updated.image.as_deref(), Some("uploads/new.png"));
    }

    #[test]
    fn preserving_image_without_existing_image_stays_absent() {
        let payload = update().preserving_image(&product(None));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["registroSanitario"], "RS-2024-002");
    }

    #[test]
    fn input_prefills_from_product() {
        let input = ProductInput::from(&product(None));
        assert_eq!(input.name, "Arroz Integral");
        assert_eq!(input.registro_sanitario, "RS-2024-001");
    }
}
