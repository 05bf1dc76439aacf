//! 레거시 클라이언트 보고 형식.
//!
//! 구형 데스크톱 클라이언트가 보내는 평면(flat) JSON. 수집 중에만 존재하며
//! [`crate::normalize`]에서 [`NewDiagnostic`](super::diagnostic::NewDiagnostic)으로 변환된 뒤 버려진다.

use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// 레거시 평면 진단 보고
///
/// 용량은 GB 단위 숫자, 배터리는 충전 퍼센트로 전달된다.
/// 누락된 필드는 0 또는 빈 문자열로 채워진다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyClientReport {
    #[serde(deserialize_with = "null_as_default")]
    pub machine_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cpu_cores: i64,
    /// 전체 메모리 (GB)
    #[serde(deserialize_with = "null_as_default")]
    pub ram_total_gb: f64,
    /// 사용 메모리 (GB)
    #[serde(deserialize_with = "null_as_default")]
    pub ram_used_gb: f64,
    /// 전체 저장 공간 (GB)
    #[serde(deserialize_with = "null_as_default")]
    pub storage_total_gb: f64,
    /// 사용 저장 공간 (GB)
    #[serde(deserialize_with = "null_as_default")]
    pub storage_used_gb: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub battery_health: String,
    #[serde(deserialize_with = "null_as_default")]
    pub battery_cycle_count: i64,
    /// 배터리 충전량 (%)
    #[serde(deserialize_with = "null_as_default")]
    pub battery_percentage: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub test_duration_seconds: f64,
    /// 레거시 상태 어휘 (completed / failed / running ...)
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}
