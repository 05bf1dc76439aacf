//! 진단 API 핸들러.
//!
//! 수집 본문은 `Bytes`로 받아 코어 수집 파이프라인에 그대로 넘긴다.
//! Content-Type 헤더가 없는 구형 클라이언트도 수용하기 위함이다.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hwdiag_core::ingest::ingest_bytes;
use hwdiag_core::models::diagnostic::DiagnosticRecord;
use serde::Serialize;

use super::{DiagnosticListResponse, ListQuery};
use crate::error::ApiError;
use crate::AppState;

/// 숫자가 아닌 ID에 대한 응답 메시지
const INVALID_ID_MESSAGE: &str = "invalid diagnostic id";

/// 수집 응답
#[derive(Debug, Serialize)]
pub struct CreateDiagnosticResponse {
    pub success: bool,
    pub message: String,
    /// 할당된 레코드 ID
    pub id: i64,
}

/// 단건 조회 응답
#[derive(Debug, Serialize)]
pub struct DiagnosticResponse {
    pub success: bool,
    pub diagnostic: DiagnosticRecord,
}

/// 진단 보고 수집
///
/// POST /api/v1/diagnostics
pub async fn create_diagnostic(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateDiagnosticResponse>), ApiError> {
    let outcome = ingest_bytes(state.repository.as_ref(), &body).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDiagnosticResponse {
            success: true,
            message: "진단이 저장되었습니다".to_string(),
            id: outcome.id,
        }),
    ))
}

/// 진단 목록 조회 (최신순)
///
/// GET /api/v1/diagnostics?limit=N
pub async fn list_diagnostics(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<DiagnosticListResponse>, ApiError> {
    let records = state.repository.list_all(query.limit()).await?;
    Ok(Json(records.into()))
}

/// 진단 단건 조회
///
/// GET /api/v1/diagnostics/{id}
pub async fn get_diagnostic(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DiagnosticResponse>, ApiError> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ApiError::BadRequest(INVALID_ID_MESSAGE.to_string()))?;

    let diagnostic = state.repository.get_by_id(id).await?;

    Ok(Json(DiagnosticResponse {
        success: true,
        diagnostic,
    }))
}

/// 시리얼 번호별 진단 조회 (최신순)
///
/// GET /api/v1/diagnostics/serial/{serial}
pub async fn list_by_serial(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<Json<DiagnosticListResponse>, ApiError> {
    let records = state.repository.list_by_serial(&serial).await?;
    Ok(Json(records.into()))
}
