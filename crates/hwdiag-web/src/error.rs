//! API 에러 처리.
//!
//! 코어 에러 분류를 HTTP 상태 코드로 옮긴다.
//! 형식/검증 → 400, 미발견 → 404, 저장소 및 기타 → 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hwdiag_core::error::{CoreError, ErrorKind};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 내부 서버 오류
    #[error("내부 서버 오류: {0}")]
    Internal(String),

    /// 리소스를 찾을 수 없음
    #[error("리소스를 찾을 수 없음: {0}")]
    NotFound(String),

    /// 잘못된 요청
    #[error("잘못된 요청: {0}")]
    BadRequest(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 항상 false
    pub success: bool,
    /// 에러 메시지
    pub message: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl ApiError {
    /// HTTP 상태 코드
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::Internal(msg) | ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg,
        };

        let body = ErrorResponse {
            success: false,
            message,
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err.kind() {
            ErrorKind::Format | ErrorKind::Validation => ApiError::BadRequest(err.to_string()),
            ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            ErrorKind::Storage | ErrorKind::Internal => {
                error!("요청 처리 실패: {err}");
                ApiError::Internal(err.to_string())
            }
        }
    }
}
