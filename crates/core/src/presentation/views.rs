//! Read-side view models.
//!
//! Each view combines the date normalizer, the status evaluator and the URL
//! builder for a supplied `today`. Image and QR fields are always resolved
//! through [`AssetUrls`]; the `has_*` flags tell a renderer whether the
//! resolved URL points at a real file or at the placeholder.

use chrono::NaiveDate;
use serde::Serialize;

use crate::batch::ProductBatch;
use crate::batch_status::{self, BatchStatus};
use crate::dates::{self, DateError};
use crate::product::Product;
use crate::types::DbId;

use super::urls::{qr_download_filename, AssetUrls};

/// Short badge shown on an expired batch card.
pub const EXPIRED_BADGE: &str = "Vencido";

/// The public verification page for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationView {
    pub batch_id: String,
    pub status: BatchStatus,
    pub status_label: &'static str,
    pub product_name: String,
    pub registro_sanitario: String,
    pub product_image_url: String,
    pub has_product_image: bool,
    pub numero_maquilla: String,
    pub variedad_arroz: String,
    /// `DD/MM/YYYY`
    pub fecha_produccion: String,
    /// `DD/MM/YYYY`
    pub fecha_vencimiento: String,
    pub qr_code_url: String,
    pub has_qr_code: bool,
    pub qr_download_filename: Option<String>,
}

impl VerificationView {
    pub fn build(
        batch: &ProductBatch,
        today: NaiveDate,
        urls: &AssetUrls,
    ) -> Result<Self, DateError> {
        let produccion = batch.production_date()?;
        let vencimiento = batch.expiration_date()?;
        let status = batch_status::evaluate(vencimiento, today);
        let has_qr_code = batch.qr_code_url.is_some();

        Ok(Self {
            batch_id: batch.id.clone(),
            status,
            status_label: status.label(),
            product_name: batch.product.name.clone(),
            registro_sanitario: batch.product.registro_sanitario.clone(),
            product_image_url: urls.product_image(&batch.product),
            has_product_image: batch.product.image.is_some(),
            numero_maquilla: batch.numero_maquilla.clone(),
            variedad_arroz: batch.variedad_arroz.clone(),
            fecha_produccion: dates::format_display(produccion),
            fecha_vencimiento: dates::format_display(vencimiento),
            qr_code_url: urls.qr_code(batch),
            has_qr_code,
            qr_download_filename: has_qr_code.then(|| qr_download_filename(&batch.id)),
        })
    }
}

/// One entry in a product's batch list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCardView {
    pub id: String,
    pub numero_maquilla: String,
    pub variedad_arroz: String,
    pub fecha_produccion: String,
    pub fecha_vencimiento: String,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
    pub qr_code_url: String,
    pub has_qr_code: bool,
}

impl BatchCardView {
    pub fn build(
        batch: &ProductBatch,
        today: NaiveDate,
        urls: &AssetUrls,
    ) -> Result<Self, DateError> {
        let vencimiento = batch.expiration_date()?;
        let status = batch_status::evaluate(vencimiento, today);

        Ok(Self {
            id: batch.id.clone(),
            numero_maquilla: batch.numero_maquilla.clone(),
            variedad_arroz: batch.variedad_arroz.clone(),
            fecha_produccion: dates::format_display(batch.production_date()?),
            fecha_vencimiento: dates::format_display(vencimiento),
            status,
            badge: status.is_expired().then_some(EXPIRED_BADGE),
            qr_code_url: urls.qr_code(batch),
            has_qr_code: batch.qr_code_url.is_some(),
        })
    }
}

/// One entry in the product catalog list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardView {
    pub id: DbId,
    pub name: String,
    pub registro_sanitario: String,
    pub image_url: String,
    pub has_image: bool,
}

impl ProductCardView {
    pub fn build(product: &Product, urls: &AssetUrls) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            registro_sanitario: product.registro_sanitario.clone(),
            image_url: urls.product_image(product),
            has_image: product.image.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::PLACEHOLDER_IMAGE;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn product(image: Option<&str>) -> Product {
        Product {
            id: 7,
            name: "Arroz Integral Premium".to_string(),
            registro_sanitario: "RS-2024-001".to_string(),
            image: image.map(str::to_string),
        }
    }

    fn batch(vencimiento: &str, qr: Option<&str>, image: Option<&str>) -> ProductBatch {
        ProductBatch {
            id: "b-42".to_string(),
            product: product(image),
            numero_maquilla: "M-001".to_string(),
            variedad_arroz: "Grano largo".to_string(),
            fecha_produccion: "2024-01-10".to_string(),
            fecha_vencimiento: vencimiento.to_string(),
            qr_code_url: qr.map(str::to_string),
        }
    }

    #[test]
    fn verification_view_for_valid_batch() {
        let urls = AssetUrls::new("http://host:8081");
        let b = batch("2024-07-10", Some("uploads/qr/b-42.png"), Some("/uploads/p.png"));
        let view = VerificationView::build(&b, ymd(2024, 7, 10), &urls).unwrap();

        assert_eq!(view.status, BatchStatus::Valid);
        assert_eq!(view.status_label, "Producto Vigente");
        assert_eq!(view.fecha_produccion, "10/01/2024");
        assert_eq!(view.fecha_vencimiento, "10/07/2024");
        assert_eq!(view.product_image_url, "http://host:8081/uploads/p.png");
        assert_eq!(view.qr_code_url, "http://host:8081/uploads/qr/b-42.png");
        assert_eq!(view.qr_download_filename.as_deref(), Some("qr-b-42.png"));
    }

    #[test]
    fn verification_view_for_expired_batch() {
        let view = VerificationView::build(
            &batch("2024-07-10", None, None),
            ymd(2024, 7, 11),
            &AssetUrls::default(),
        )
        .unwrap();
        assert_eq!(view.status, BatchStatus::Expired);
        assert_eq!(view.status_label, "Producto Vencido");
    }

    #[test]
    fn absent_images_use_placeholder_everywhere() {
        let urls = AssetUrls::default();
        let b = batch("2024-07-10", None, None);

        let view = VerificationView::build(&b, ymd(2024, 1, 1), &urls).unwrap();
        assert_eq!(view.product_image_url, PLACEHOLDER_IMAGE);
        assert_eq!(view.qr_code_url, PLACEHOLDER_IMAGE);
        assert!(!view.has_product_image);
        assert!(!view.has_qr_code);
        assert_eq!(view.qr_download_filename, None);

        let card = BatchCardView::build(&b, ymd(2024, 1, 1), &urls).unwrap();
        assert_eq!(card.qr_code_url, PLACEHOLDER_IMAGE);

        let product_card = ProductCardView::build(&b.product, &urls);
        assert_eq!(product_card.image_url, PLACEHOLDER_IMAGE);
        assert!(!product_card.has_image);
    }

    #[test]
    fn unparseable_stored_date_is_an_error() {
        let result = VerificationView::build(
            &batch("31-31-2024", None, None),
            ymd(2024, 1, 1),
            &AssetUrls::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn batch_card_badge_only_when_expired() {
        let urls = AssetUrls::default();
        let b = batch("2024-07-10", Some("https://cdn.example/qr.png"), None);

        let valid = BatchCardView::build(&b, ymd(2024, 7, 10), &urls).unwrap();
        assert_eq!(valid.badge, None);
        assert_eq!(valid.qr_code_url, "https://cdn.example/qr.png");

        let expired = BatchCardView::build(&b, ymd(2024, 8, 1), &urls).unwrap();
        assert_eq!(expired.badge, Some(EXPIRED_BADGE));
        let json = serde_json::to_value(&expired).unwrap();
        assert_eq!(json["status"], "expired");
        assert_eq!(json["fechaVencimiento"], "10/07/2024");
    }
}
