//! In-process fake of the external catalog service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use maquila_client::{CatalogApi, ClientConfig};

/// A running fake backend and a client pointed at it.
pub struct TestBackend {
    pub api: CatalogApi,
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl TestBackend {
    /// Number of requests the backend has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn stored_product() -> Value {
    json!({
        "id": 1,
        "name": "Arroz Integral Premium",
        "registroSanitario": "RS-2024-001",
        "image": "uploads/products/1.png"
    })
}

pub fn stored_batch(id: &str, vencimiento: &str, qr: Option<&str>) -> Value {
    json!({
        "id": id,
        "product": stored_product(),
        "numeroMaquilla": "M-001",
        "variedadArroz": "Grano largo",
        "fechaProduccion": "2024-01-10T00:00:00Z",
        "fechaVencimiento": vencimiento,
        "qrCodeUrl": qr
    })
}

async fn count_hits(
    State(hits): State<Arc<AtomicUsize>>,
    request: Request,
    next: Next,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

async fn list_products() -> Json<Value> {
    Json(json!([
        stored_product(),
        {"id": 2, "name": "Arroz Blanco", "registroSanitario": "RS-2024-002", "image": null}
    ]))
}

async fn get_product(Path(id): Path<i64>) -> Response {
    if id == 1 {
        Json(stored_product()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn create_product(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut created = body;
    created["id"] = json!(10);
    (StatusCode::CREATED, Json(created))
}

async fn read_product_form(mut multipart: Multipart, id: i64) -> Value {
    let mut product = json!({"id": id});
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let size = field.bytes().await.unwrap().len();
                product["image"] = json!(format!("uploads/products/{file_name}"));
                product["uploadedType"] = json!(content_type);
                product["uploadedSize"] = json!(size);
            }
            _ => {
                product[name.as_str()] = json!(field.text().await.unwrap());
            }
        }
    }
    product
}

async fn create_product_with_image(multipart: Multipart) -> Json<Value> {
    Json(read_product_form(multipart, 11).await)
}

async fn update_product_with_image(Path(id): Path<i64>, multipart: Multipart) -> Json<Value> {
    Json(read_product_form(multipart, id).await)
}

async fn update_product(Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    if id != 1 {
        return StatusCode::NOT_FOUND.into_response();
    }
    let mut updated = body;
    updated["id"] = json!(id);
    Json(updated).into_response()
}

async fn delete_product(Path(id): Path<i64>) -> StatusCode {
    if id == 1 {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn list_batches(Path(product_id): Path<i64>) -> Response {
    if product_id != 1 {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!([
        stored_batch("b-1", "2024-07-10", Some("uploads/qr/b-1.png")),
        stored_batch("b-2", "2024-07-09", None),
    ]))
    .into_response()
}

async fn create_batch(Path(product_id): Path<i64>, Json(body): Json<Value>) -> Response {
    if product_id != 1 {
        return StatusCode::NOT_FOUND.into_response();
    }
    let mut created = body;
    created["id"] = json!("b-new");
    created["product"] = stored_product();
    created["qrCodeUrl"] = json!("uploads/qr/b-new.png");
    (StatusCode::CREATED, Json(created)).into_response()
}

/// The only batch stored under a product: `b-1` of product `1`.
fn is_stored_batch(product_id: i64, batch_id: &str) -> bool {
    product_id == 1 && batch_id == "b-1"
}

async fn get_batch(Path((product_id, batch_id)): Path<(i64, String)>) -> Response {
    if !is_stored_batch(product_id, &batch_id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(stored_batch("b-1", "2024-07-10", Some("uploads/qr/b-1.png"))).into_response()
}

async fn update_batch(
    Path((product_id, batch_id)): Path<(i64, String)>,
    Json(body): Json<Value>,
) -> Response {
    if !is_stored_batch(product_id, &batch_id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let mut updated = body;
    updated["id"] = json!(batch_id);
    updated["product"] = stored_product();
    updated["qrCodeUrl"] = json!("uploads/qr/b-1.png");
    Json(updated).into_response()
}

async fn delete_batch(Path((product_id, batch_id)): Path<(i64, String)>) -> StatusCode {
    if is_stored_batch(product_id, &batch_id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn lookup_batch(Path(batch_id): Path<String>) -> Response {
    match batch_id.as_str() {
        "b-42" => {
            Json(stored_batch("b-42", "2024-07-10", Some("/uploads/qr/b-42.png"))).into_response()
        }
        "lote/7" => Json(stored_batch("lote/7", "2024-07-10", None)).into_response(),
        "b-bad-date" => Json(stored_batch("b-bad-date", "someday", None)).into_response(),
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn router(hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/admin/products", get(list_products).post(create_product))
        .route("/admin/products/with-image", post(create_product_with_image))
        .route(
            "/admin/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/admin/products/{id}/with-image",
            put(update_product_with_image),
        )
        .route(
            "/admin/products/{id}/batches",
            get(list_batches).post(create_batch),
        )
        .route(
            "/admin/products/{id}/batches/{batch_id}",
            get(get_batch).put(update_batch).delete(delete_batch),
        )
        .route("/products/{batch_id}", get(lookup_batch))
        .layer(middleware::from_fn_with_state(hits, count_hits))
}

/// Start the fake backend on an ephemeral port.
pub async fn spawn_backend() -> TestBackend {
    let hits = Arc::new(AtomicUsize::new(0));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::clone(&hits));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base_url = format!("http://{addr}/");
    let config = ClientConfig::from_values(Some(&base_url), Some("5"));
    let api = CatalogApi::new(&config).unwrap();

    TestBackend {
        api,
        base_url: config.api_url,
        hits,
    }
}
