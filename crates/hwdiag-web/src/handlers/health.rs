//! 헬스 체크 핸들러.

use axum::Json;
use serde::Serialize;

/// 헬스 체크 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

/// 서버 상태 확인
///
/// GET /api/v1/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "진단 API 서버 정상 동작 중",
        version: env!("CARGO_PKG_VERSION"),
    })
}
