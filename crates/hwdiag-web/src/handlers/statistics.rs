//! 통계 API 핸들러.

use axum::extract::State;
use axum::Json;
use hwdiag_core::models::statistics::Statistics;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// 통계 응답
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub success: bool,
    pub statistics: Statistics,
}

/// 전체 진단 통계
///
/// GET /api/v1/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let statistics = state.repository.statistics().await?;
    debug!(
        "통계 조회: 전체 {}건, 머신 {}대",
        statistics.total_diagnostics, statistics.unique_machines
    );

    Ok(Json(StatisticsResponse {
        success: true,
        statistics,
    }))
}
