use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, DOCUMENT_MAGIC, LARGE_BODY_SIZE};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- envelopes ---

#[tokio::test]
async fn users_returns_zero_code_envelope() {
    let resp = app().oneshot(get("/v1/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({"code": 0, "value": 1}));
}

#[tokio::test]
async fn failing_returns_non_zero_code() {
    let resp = app().oneshot(get("/v1/failing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["code"], 7);
}

#[tokio::test]
async fn list_returns_array() {
    let resp = app().oneshot(get("/v1/list")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await.is_array());
}

// --- failures ---

#[tokio::test]
async fn broken_returns_500() {
    let resp = app().oneshot(get("/v1/broken")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(&body_bytes(resp).await[..], b"internal error");
}

#[tokio::test]
async fn garbage_is_not_json() {
    let resp = app().oneshot(get("/v1/garbage")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

// --- echo ---

#[tokio::test]
async fn echo_returns_body_and_content_type() {
    let resp = app()
        .oneshot(json_request("POST", "/v1/echo", r#"{"name":"ann"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["code"], 0);
    assert_eq!(json["echo"]["name"], "ann");
    assert_eq!(json["content_type"], "application/json");
}

#[tokio::test]
async fn echo_accepts_put() {
    let resp = app()
        .oneshot(json_request("PUT", "/v1/echo", "[1]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["echo"], serde_json::json!([1]));
}

#[tokio::test]
async fn echo_rejects_missing_content_type() {
    let req = Request::builder()
        .method("POST")
        .uri("/v1/echo")
        .body(r#"{"name":"ann"}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- documents ---

#[tokio::test]
async fn render_redirects_to_document() {
    let resp = app()
        .oneshot(json_request("POST", "/render/invoice", r#"{"total":12}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(http::header::LOCATION).unwrap(),
        "/documents/invoice.pdf"
    );
}

#[tokio::test]
async fn document_serves_pdf_bytes() {
    let resp = app().oneshot(get("/documents/invoice.pdf")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let bytes = body_bytes(resp).await;
    assert!(bytes.starts_with(DOCUMENT_MAGIC));
    assert!(bytes.ends_with(b"invoice.pdf"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get("/v1/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn render_large_serves_oversized_document() {
    let resp = app()
        .oneshot(json_request("POST", "/render-large", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(bytes.len(), LARGE_BODY_SIZE);
    assert!(bytes.starts_with(DOCUMENT_MAGIC));
}
