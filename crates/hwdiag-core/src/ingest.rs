//! 수집 파이프라인.
//!
//! 요청 본문 → 정규화 → 검증 → 저장. 각 단계의 실패는 분류된 `CoreError`로 반환된다.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::CoreError;
use crate::models::diagnostic::NewDiagnostic;
use crate::normalize::{normalize, normalize_bytes};
use crate::ports::repository::DiagnosticRepository;
use crate::validation::validate;

/// 수집 결과
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// 할당된 레코드 ID
    pub id: i64,
    /// 저장된 정규 레코드
    pub diagnostic: NewDiagnostic,
}

/// 디코딩된 JSON 본문을 수집
pub async fn ingest(
    repository: &dyn DiagnosticRepository,
    payload: Value,
) -> Result<IngestOutcome, CoreError> {
    let diagnostic = normalize(payload).inspect_err(|e| warn!("정규화 실패: {e}"))?;
    store(repository, diagnostic).await
}

/// 요청 본문 바이트를 수집 (JSON 디코딩 실패도 `Format`으로 분류)
pub async fn ingest_bytes(
    repository: &dyn DiagnosticRepository,
    body: &[u8],
) -> Result<IngestOutcome, CoreError> {
    let diagnostic = normalize_bytes(body).inspect_err(|e| warn!("정규화 실패: {e}"))?;
    store(repository, diagnostic).await
}

async fn store(
    repository: &dyn DiagnosticRepository,
    diagnostic: NewDiagnostic,
) -> Result<IngestOutcome, CoreError> {
    validate(&diagnostic).inspect_err(|e| warn!("검증 실패: {e}"))?;

    let id = repository
        .create(&diagnostic)
        .await
        .inspect_err(|e| error!("진단 저장 실패: {e}"))?;

    info!(
        "진단 저장 완료: id={id}, machine={}, serial={}",
        diagnostic.system_info.machine_name, diagnostic.system_info.serial_number
    );

    Ok(IngestOutcome { id, diagnostic })
}
