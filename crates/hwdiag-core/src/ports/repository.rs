//! 진단 저장소 포트.
//!
//! 구현: `hwdiag-storage` crate (rusqlite)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::diagnostic::{DiagnosticRecord, NewDiagnostic};
use crate::models::statistics::Statistics;

/// 진단 레코드 저장소
///
/// 레코드는 생성만 되며 수정/삭제되지 않는다.
#[async_trait]
pub trait DiagnosticRepository: Send + Sync {
    /// 레코드 저장 후 새로 할당된 ID 반환
    ///
    /// ID는 저장소의 자동 증가로 할당되고 `created_at`은 서버 현재 시각이다.
    async fn create(&self, diagnostic: &NewDiagnostic) -> Result<i64, CoreError>;

    /// 최신순 전체 조회 (`limit <= 0`이면 제한 없음)
    async fn list_all(&self, limit: i64) -> Result<Vec<DiagnosticRecord>, CoreError>;

    /// ID로 단건 조회 (없으면 `CoreError::NotFound`)
    async fn get_by_id(&self, id: i64) -> Result<DiagnosticRecord, CoreError>;

    /// 시리얼 번호로 최신순 조회
    async fn list_by_serial(&self, serial_number: &str)
        -> Result<Vec<DiagnosticRecord>, CoreError>;

    /// 집계 통계
    async fn statistics(&self) -> Result<Statistics, CoreError>;
}
