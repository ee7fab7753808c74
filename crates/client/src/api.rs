//! REST client for the external catalog service.
//!
//! Wraps the administrative product/batch endpoints and the public
//! verification lookup using [`reqwest`]. Failures are never retried here;
//! retrying is a user action.

use maquila_core::batch::{BatchInput, ProductBatch};
use maquila_core::product::{NewProduct, Product, ProductInput};
use maquila_core::types::DbId;
use maquila_core::validation::{validate_batch, validate_product};
use reqwest::{Method, StatusCode, Url};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::upload::ImageUpload;

const ENTITY_PRODUCT: &str = "product";
const ENTITY_BATCH: &str = "batch";

/// HTTP client for one catalog backend.
///
/// Request URLs are the configured origin plus percent-encoded path
/// segments; an identifier is always sent as exactly one segment.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    api_url: String,
    base: Url,
}

impl CatalogApi {
    /// Create a client for the configured origin and request timeout.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Self::with_client(client, &config.api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    ///
    /// Fails when `api_url` is not an absolute URL that can carry a path.
    pub fn with_client(client: reqwest::Client, api_url: &str) -> ClientResult<Self> {
        let api_url = api_url.trim_end_matches('/').to_string();
        let base = Url::parse(&api_url).map_err(|err| ClientError::InvalidUrl {
            url: api_url.clone(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: api_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            client,
            api_url,
            base,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- products ----

    /// `GET /admin/products`
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let response = self.send(Method::GET, &["admin", "products"]).await?;
        Self::parse_response(response).await
    }

    /// `GET /admin/products/{id}`
    pub async fn get_product(&self, id: DbId) -> ClientResult<Product> {
        let id_segment = id.to_string();
        let response = self
            .send(Method::GET, &["admin", "products", id_segment.as_str()])
            .await?;
        Self::expect_found(response, ENTITY_PRODUCT, id).await
    }

    /// Create a product, as JSON or as multipart when an image is attached.
    ///
    /// The input and the attachment are validated before anything is sent.
    pub async fn create_product(
        &self,
        input: &ProductInput,
        image: Option<ImageUpload>,
    ) -> ClientResult<Product> {
        let payload = validate_product(input)?;

        let response = match image {
            Some(image) => {
                image.validate()?;
                let form = Self::product_form(&payload, image)?;
                self.send_multipart(
                    Method::POST,
                    &["admin", "products", "with-image"],
                    form,
                )
                .await?
            }
            None => {
                self.send_json(Method::POST, &["admin", "products"], &payload)
                    .await?
            }
        };

        let product: Product = Self::parse_response(response).await?;
        tracing::info!(product_id = product.id, "Product created");
        Ok(product)
    }

    /// Update a product in place.
    ///
    /// Without a new image the existing image reference is sent back so the
    /// store keeps it.
    pub async fn update_product(
        &self,
        existing: &Product,
        input: &ProductInput,
        image: Option<ImageUpload>,
    ) -> ClientResult<Product> {
        let payload = validate_product(input)?;
        let id = existing.id;
        let id_segment = id.to_string();

        let response = match image {
            Some(image) => {
                image.validate()?;
                let form = Self::product_form(&payload, image)?;
                self.send_multipart(
                    Method::PUT,
                    &["admin", "products", id_segment.as_str(), "with-image"],
                    form,
                )
                .await?
            }
            None => {
                let payload = payload.preserving_image(existing);
                self.send_json(
                    Method::PUT,
                    &["admin", "products", id_segment.as_str()],
                    &payload,
                )
                .await?
            }
        };

        let product = Self::expect_found(response, ENTITY_PRODUCT, id).await?;
        tracing::info!(product_id = id, "Product updated");
        Ok(product)
    }

    /// `DELETE /admin/products/{id}`
    pub async fn delete_product(&self, id: DbId) -> ClientResult<()> {
        let id_segment = id.to_string();
        let response = self
            .send(Method::DELETE, &["admin", "products", id_segment.as_str()])
            .await?;
        Self::expect_deleted(response, ENTITY_PRODUCT, id).await?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    // ---- batches ----

    /// `GET /admin/products/{productId}/batches`
    pub async fn list_batches(&self, product_id: DbId) -> ClientResult<Vec<ProductBatch>> {
        let product_segment = product_id.to_string();
        let response = self
            .send(
                Method::GET,
                &["admin", "products", product_segment.as_str(), "batches"],
            )
            .await?;
        Self::expect_found(response, ENTITY_PRODUCT, product_id).await
    }

    /// `GET /admin/products/{productId}/batches/{batchId}`
    pub async fn get_batch(&self, product_id: DbId, batch_id: &str) -> ClientResult<ProductBatch> {
        let product_segment = product_id.to_string();
        let response = self
            .send(
                Method::GET,
                &[
                    "admin",
                    "products",
                    product_segment.as_str(),
                    "batches",
                    batch_id,
                ],
            )
            .await?;
        Self::expect_found(response, ENTITY_BATCH, batch_id).await
    }

    /// Create a batch under an existing product. Validated before sending.
    pub async fn create_batch(
        &self,
        product_id: DbId,
        input: &BatchInput,
    ) -> ClientResult<ProductBatch> {
        let payload = validate_batch(input)?;
        let product_segment = product_id.to_string();
        let response = self
            .send_json(
                Method::POST,
                &["admin", "products", product_segment.as_str(), "batches"],
                &payload,
            )
            .await?;
        let batch: ProductBatch = Self::expect_found(response, ENTITY_PRODUCT, product_id).await?;
        tracing::info!(product_id, batch_id = %batch.id, "Batch created");
        Ok(batch)
    }

    /// Update a batch in place. Validated before sending.
    pub async fn update_batch(
        &self,
        product_id: DbId,
        batch_id: &str,
        input: &BatchInput,
    ) -> ClientResult<ProductBatch> {
        let payload = validate_batch(input)?;
        let product_segment = product_id.to_string();
        let response = self
            .send_json(
                Method::PUT,
                &[
                    "admin",
                    "products",
                    product_segment.as_str(),
                    "batches",
                    batch_id,
                ],
                &payload,
            )
            .await?;
        let batch = Self::expect_found(response, ENTITY_BATCH, batch_id).await?;
        tracing::info!(product_id, batch_id, "Batch updated");
        Ok(batch)
    }

    /// `DELETE /admin/products/{productId}/batches/{batchId}`
    pub async fn delete_batch(&self, product_id: DbId, batch_id: &str) -> ClientResult<()> {
        let product_segment = product_id.to_string();
        let response = self
            .send(
                Method::DELETE,
                &[
                    "admin",
                    "products",
                    product_segment.as_str(),
                    "batches",
                    batch_id,
                ],
            )
            .await?;
        Self::expect_deleted(response, ENTITY_BATCH, batch_id).await?;
        tracing::info!(product_id, batch_id, "Batch deleted");
        Ok(())
    }

    // ---- public lookup ----

    /// Public verification lookup: `GET /products/{batchId}`.
    ///
    /// Returns the batch with its product embedded.
    pub async fn lookup_batch(&self, batch_id: &str) -> ClientResult<ProductBatch> {
        let response = self.send(Method::GET, &["products", batch_id]).await?;
        Self::expect_found(response, ENTITY_BATCH, batch_id).await
    }

    // ---- private helpers ----

    /// The origin with `segments` appended, each percent-encoded as a
    /// single path segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl {
                url: self.api_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn product_form(
        payload: &NewProduct,
        image: ImageUpload,
    ) -> ClientResult<reqwest::multipart::Form> {
        Ok(reqwest::multipart::Form::new()
            .text("name", payload.name.clone())
            .text("registroSanitario", payload.registro_sanitario.clone())
            .part("image", image.into_part()?))
    }

    async fn send(&self, method: Method, segments: &[&str]) -> ClientResult<reqwest::Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, path = url.path(), "Catalog request");
        Ok(self.client.request(method, url).send().await?)
    }

    async fn send_json<T: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &T,
    ) -> ClientResult<reqwest::Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, path = url.path(), "Catalog request (json)");
        Ok(self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await?)
    }

    async fn send_multipart(
        &self,
        method: Method,
        segments: &[&str],
        form: reqwest::multipart::Form,
    ) -> ClientResult<reqwest::Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, path = url.path(), "Catalog request (multipart)");
        Ok(self
            .client
            .request(method, url)
            .multipart(form)
            .send()
            .await?)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Catalog request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Like [`Self::parse_response`], with 404 reported as not-found for
    /// the given entity.
    async fn expect_found<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        entity: &'static str,
        id: impl ToString,
    ) -> ClientResult<T> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(entity, id));
        }
        Self::parse_response(response).await
    }

    async fn expect_deleted(
        response: reqwest::Response,
        entity: &'static str,
        id: impl ToString,
    ) -> ClientResult<()> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(entity, id));
        }
        Self::ensure_success(response).await?;
        Ok(())
    }
}
