use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use lotkeeper::server::{router, AppState};
use lotkeeper::{ImportLayout, LotRecord, LotStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "lotkeeper-test-boundary";

fn test_app(lots: &[LotRecord]) -> Router {
    let store = LotStore::open_in_memory().unwrap();
    for lot in lots {
        store.insert(lot).unwrap();
    }
    router(AppState::new(store, ImportLayout::Base))
}

fn multipart_body(field: &str, csv: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"lot.list.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = BOUNDARY,
    )
}

fn upload_request(uri: &str, field: &str, csv: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, csv)))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_lookup_uses_item_key() {
    let app = test_app(&[LotRecord::new("LOT1", "PARTA", "2023-01-15")]);

    let (status, body) = send(&app, get("/?lot=LOT1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"lot": "LOT1", "item": "PARTA", "expiration": "2023-01-15"}));
}

#[tokio::test]
async fn test_lookup_unknown_lot() {
    let app = test_app(&[]);

    let (status, body) = send(&app, get("/?lot=NOPE")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "lot not found"}));
}

#[tokio::test]
async fn test_all_part_and_count() {
    let app = test_app(&[
        LotRecord::new("LOT1", "PARTA", "2023-01-15"),
        LotRecord::new("LOT2", "PARTB", "2023-02-15"),
        LotRecord::new("LOT3", "PARTA", "2023-03-15"),
    ]);

    let (_, all) = send(&app, get("/all")).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, by_part) = send(&app, get("/part?part=PARTA")).await;
    let mut lots: Vec<&str> = by_part
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["lot"].as_str().unwrap())
        .collect();
    lots.sort();
    assert_eq!(lots, vec!["LOT1", "LOT3"]);

    let (status, count) = send(&app, get("/count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, json!({"count": 3}));
}

#[tokio::test]
async fn test_upload_reports_updates_and_duplicates() {
    let app = test_app(&[LotRecord::new("LOT0", "PARTZ", "2022-12-01")]);
    let csv = "LOT1|X,PARTA,01-15-23\nLOT0,PARTZ,12-01-22\nLOT2,PARTB,undated\n";

    let (status, body) = send(&app, upload_request("/update", "file", csv)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "updates": [{"lot": "LOT1", "part": "PARTA", "expiration": "2023-01-15"}],
            "constraint_errors_count": 1,
            "count": 2
        })
    );
}

#[tokio::test]
async fn test_upload_extended_layout_override() {
    let app = test_app(&[]);
    let csv = "LOT1,PARTA,01-15-23,7,2\n";

    let (status, body) = send(&app, upload_request("/update?layout=extended", "file", csv)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updates"][0]["on_hand"], "7");
    assert_eq!(body["updates"][0]["allocated"], "2");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = test_app(&[]);

    let (status, body) = send(&app, upload_request("/update", "other", "LOT1,PARTA,01-15-23\n")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("No file field"));
}

#[tokio::test]
async fn test_upload_invalid_utf8_is_fatal() {
    let app = test_app(&[]);
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"lot.list.csv\"\r\n\r\n",
        b = BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(b"LOT1,PART\xff,01-15-23\n");
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/update")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("updates").is_none());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_upload_store_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("lots.db");
    let app = router(AppState::new(LotStore::open(&db).unwrap(), ImportLayout::Base));
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute("DROP TABLE lots", [])
        .unwrap();

    let (status, body) = send(&app, upload_request("/update", "file", "LOT1,PARTA,01-15-23\n")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("updates").is_none());
    assert!(body["error"].as_str().unwrap().contains("Storage error"));
}

#[tokio::test]
async fn test_delete_known_and_unknown_lot() {
    let app = test_app(&[LotRecord::new("LOT1", "PARTA", "2023-01-15")]);

    for lot in ["LOT1", "LOT1", "MISSING"] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/delete")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("lot={}", lot)))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"deleted": lot}));
    }

    let (_, count) = send(&app, get("/count")).await;
    assert_eq!(count, json!({"count": 0}));
}

#[tokio::test]
async fn test_forms_are_html() {
    let app = test_app(&[]);

    for uri in ["/update", "/delete"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("<form"));
    }
}
