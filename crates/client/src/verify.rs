//! Public batch verification.

use chrono::NaiveDate;
use maquila_core::batch::ProductBatch;
use maquila_core::presentation::{AssetUrls, BatchCardView, VerificationView};
use maquila_core::types::DbId;

use crate::api::CatalogApi;
use crate::error::ClientResult;

/// Looks a batch up and renders it for a third party checking
/// authenticity and shelf life.
#[derive(Debug, Clone)]
pub struct Verifier {
    api: CatalogApi,
    urls: AssetUrls,
}

impl Verifier {
    pub fn new(api: CatalogApi, urls: AssetUrls) -> Self {
        Self { api, urls }
    }

    /// URLs resolve against the same origin the client talks to.
    pub fn for_api(api: CatalogApi) -> Self {
        let urls = AssetUrls::new(api.api_url());
        Self::new(api, urls)
    }

    pub fn urls(&self) -> &AssetUrls {
        &self.urls
    }

    /// Fetch a batch by id and build its verification view for `today`.
    pub async fn verify(&self, batch_id: &str, today: NaiveDate) -> ClientResult<VerificationView> {
        let batch = self.api.lookup_batch(batch_id).await?;
        let view = VerificationView::build(&batch, today, &self.urls)?;
        tracing::info!(batch_id, status = %view.status, "Batch verified");
        Ok(view)
    }

    /// Batch list entries for one product, status computed for `today`.
    pub async fn batch_cards(
        &self,
        product_id: DbId,
        today: NaiveDate,
    ) -> ClientResult<Vec<BatchCardView>> {
        let batches = self.api.list_batches(product_id).await?;
        Ok(cards(&batches, today, &self.urls)?)
    }
}

fn cards(
    batches: &[ProductBatch],
    today: NaiveDate,
    urls: &AssetUrls,
) -> Result<Vec<BatchCardView>, maquila_core::dates::DateError> {
    batches
        .iter()
        .map(|batch| BatchCardView::build(batch, today, urls))
        .collect()
}
