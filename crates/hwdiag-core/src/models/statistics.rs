//! 집계 통계 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 전체 진단 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// 전체 레코드 수
    pub total_diagnostics: u64,
    /// 고유 시리얼 번호 수
    pub unique_machines: u64,
    /// 상태별 레코드 수
    pub status_distribution: BTreeMap<String, u64>,
    /// 가장 최근 저장 시각 (레코드가 없으면 생략)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_diagnostic: Option<DateTime<Utc>>,
}
