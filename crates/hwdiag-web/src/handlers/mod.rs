//! API 핸들러 모듈.

pub mod diagnostics;
pub mod health;
pub mod statistics;

use hwdiag_core::models::diagnostic::DiagnosticRecord;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// 목록 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// 최대 조회 개수 (없거나 숫자가 아니면 전체)
    pub limit: Option<String>,
}

impl ListQuery {
    /// 관대한 limit 해석 (해석 불가 → 0, 제한 없음)
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }
}

/// 진단 목록 응답
#[derive(Debug, Serialize)]
pub struct DiagnosticListResponse {
    pub success: bool,
    /// 반환된 레코드 수
    pub count: usize,
    pub diagnostics: Vec<DiagnosticRecord>,
}

impl From<Vec<DiagnosticRecord>> for DiagnosticListResponse {
    fn from(diagnostics: Vec<DiagnosticRecord>) -> Self {
        Self {
            success: true,
            count: diagnostics.len(),
            diagnostics,
        }
    }
}

/// 등록되지 않은 경로
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("존재하지 않는 경로입니다".to_string())
}
