//! HTTP API 통합 테스트.
//!
//! 파일 기반 저장소 위의 전체 라우터로 수집 → 조회 → 통계 흐름을 검증.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use hwdiag_core::ports::repository::DiagnosticRepository;
use hwdiag_storage::sqlite::SqliteStorage;
use hwdiag_web::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post(body: Value) -> Request<Body> {
    Request::post("/api/v1/diagnostics")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn full_api_flow_on_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::open(&dir.path().join("api.db")).unwrap();
    let repository: Arc<dyn DiagnosticRepository> = Arc::new(storage);
    let app = router(AppState { repository });

    let (status, body) = call(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    // 레거시 2건 + 정규 1건
    for (serial, status) in [("SER-1", "completed"), ("SER-2", "failed")] {
        let (code, created) = call(
            &app,
            post(json!({
                "machine_name": "bench",
                "serial_number": serial,
                "cpu_model": "Intel Xeon",
                "cpu_cores": 12,
                "ram_total_gb": 64,
                "ram_used_gb": 16,
                "status": status
            })),
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
        assert_eq!(created["success"], true);
    }

    let (code, created) = call(
        &app,
        post(json!({
            "system_info": {
                "machine_name": "bench",
                "serial_number": "SER-1",
                "model": "Mac Pro",
                "os_version": "macOS 14"
            },
            "cpu": { "model": "Intel Xeon W", "cores": 16, "frequency": "3.2 GHz" },
            "ram": { "total": "96.00 GB", "used": "20.00 GB", "available": "76.00 GB" },
            "storage": { "type": "SSD", "capacity": "2000 GB", "used": "800 GB", "available": "1200 GB" },
            "battery": { "cycle_count": 0, "health": "N/A", "capacity": "0%" },
            "status": "success",
            "duration": 120.0
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    let latest_id = created["id"].as_i64().unwrap();

    let (_, list) = call(&app, get("/api/v1/diagnostics")).await;
    assert_eq!(list["count"], 3);
    assert_eq!(list["diagnostics"][0]["id"], latest_id);

    let (_, by_serial) = call(&app, get("/api/v1/diagnostics/serial/SER-1")).await;
    assert_eq!(by_serial["count"], 2);
    assert_eq!(by_serial["diagnostics"][0]["id"], latest_id);

    let (_, single) = call(&app, get(&format!("/api/v1/diagnostics/{latest_id}"))).await;
    assert_eq!(single["diagnostic"]["system_info"]["model"], "Mac Pro");
    assert!(single["diagnostic"]["battery"].get("power_adapter").is_none());

    let (_, stats) = call(&app, get("/api/v1/statistics")).await;
    assert_eq!(stats["statistics"]["total_diagnostics"], 3);
    assert_eq!(stats["statistics"]["unique_machines"], 2);
    assert_eq!(stats["statistics"]["status_distribution"]["success"], 2);
    assert_eq!(stats["statistics"]["status_distribution"]["failed"], 1);
}

#[tokio::test]
async fn error_responses_share_one_shape() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let app = router(AppState {
        repository: Arc::new(storage),
    });

    let requests = [
        (
            Request::post("/api/v1/diagnostics")
                .body(Body::from("not json"))
                .unwrap(),
            StatusCode::BAD_REQUEST,
        ),
        (get("/api/v1/diagnostics/xyz"), StatusCode::BAD_REQUEST),
        (get("/api/v1/diagnostics/77"), StatusCode::NOT_FOUND),
    ];

    for (request, expected) in requests {
        let (status, body) = call(&app, request).await;
        assert_eq!(status, expected);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], expected.as_u16());
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}
