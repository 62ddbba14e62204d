use std::time::Duration;

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// How long `/v1/slow` stalls before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

/// Size of the bodies served by `/v1/large` and `/render-large`; above
/// ureq's default 10 MiB body limit.
pub const LARGE_BODY_SIZE: usize = 11 * 1024 * 1024;

/// Leading bytes of every rendered document.
pub const DOCUMENT_MAGIC: &[u8] = b"%PDF-1.4\n";

#[derive(Debug, Serialize)]
pub struct Echo {
    pub code: i64,
    pub echo: Value,
    pub content_type: Option<String>,
}

pub fn app() -> Router {
    Router::new()
        .route("/v1/users", get(users))
        .route("/v1/failing", get(failing))
        .route("/v1/broken", get(broken))
        .route("/v1/garbage", get(garbage))
        .route("/v1/list", get(list))
        .route("/v1/slow", get(slow))
        .route("/v1/large", get(large))
        .route("/v1/echo", post(echo).put(echo).patch(echo))
        .route("/render/{template}", post(render))
        .route("/render-large", post(render_large))
        .route("/documents/{name}", get(document))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn users() -> Json<Value> {
    Json(json!({"code": 0, "value": 1}))
}

async fn failing() -> Json<Value> {
    Json(json!({"code": 7, "message": "quota exceeded"}))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

async fn garbage() -> &'static str {
    "not json"
}

async fn list() -> Json<Value> {
    Json(json!([1, 2]))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(SLOW_DELAY).await;
    Json(json!({"code": 0}))
}

async fn large() -> Json<Value> {
    Json(json!({"code": 0, "blob": "a".repeat(LARGE_BODY_SIZE)}))
}

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(Echo {
        code: 0,
        echo: body,
        content_type,
    })
}

/// Accepts the template data and sends the client to where the rendered
/// document can be fetched, as rendering services typically do.
async fn render(Path(template): Path<String>, Json(data): Json<Value>) -> impl IntoResponse {
    tracing::info!("rendering {template} with {data}");
    Redirect::to(&format!("/documents/{template}.pdf"))
}

async fn render_large(Json(_data): Json<Value>) -> impl IntoResponse {
    let mut body = DOCUMENT_MAGIC.to_vec();
    body.resize(LARGE_BODY_SIZE, b'x');
    ([(header::CONTENT_TYPE, "application/pdf")], body)
}

async fn document(Path(name): Path<String>) -> impl IntoResponse {
    let mut body = DOCUMENT_MAGIC.to_vec();
    body.extend_from_slice(name.as_bytes());
    ([(header::CONTENT_TYPE, "application/pdf")], body)
}
