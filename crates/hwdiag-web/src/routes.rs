//! API 라우트 정의.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성 (`/api/v1` 아래에 중첩됨)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 헬스 체크
        .route("/health", get(handlers::health::health_check))
        // 진단 수집/조회
        .route(
            "/diagnostics",
            get(handlers::diagnostics::list_diagnostics)
                .post(handlers::diagnostics::create_diagnostic),
        )
        .route(
            "/diagnostics/{id}",
            get(handlers::diagnostics::get_diagnostic),
        )
        .route(
            "/diagnostics/serial/{serial}",
            get(handlers::diagnostics::list_by_serial),
        )
        // 통계
        .route("/statistics", get(handlers::statistics::get_statistics))
}
