//! HWDIAG 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러 타입에서 `From<CoreError>`로 변환한다.
//! 수집/조회 경로의 에러는 반드시 `Format`, `Validation`, `NotFound`, `Storage`
//! 중 하나로 분류되어 경계를 넘는다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 입력 JSON이 지원하는 어느 형식으로도 디코딩되지 않음
    #[error("잘못된 JSON 형식: {0}")]
    Format(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "diagnostic")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 저장소 I/O 또는 제약 조건 실패
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 에러 분류 (라우팅 레이어에서 HTTP 상태 코드 결정에 사용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 클라이언트 입력 형식 오류
    Format,
    /// 비즈니스 규칙 위반
    Validation,
    /// 대상 없음
    NotFound,
    /// 저장소 실패
    Storage,
    /// 부트스트랩 단계 오류 (설정, 파일 시스템)
    Internal,
}

impl CoreError {
    /// 에러 분류 반환
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Format(_) => ErrorKind::Format,
            CoreError::Validation { .. } => ErrorKind::Validation,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Storage(_) => ErrorKind::Storage,
            CoreError::Config(_) | CoreError::Io(_) => ErrorKind::Internal,
        }
    }

    /// 검증 에러 생성 헬퍼
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
