//! 하드웨어 진단 레코드 모델.
//!
//! 정규(중첩) JSON 형식과 같은 구조를 가진다. 용량/주파수 등은 "16.00 GB" 같은
//! 자유 형식 문자열(크기 서술자)로 유지한다. 선택 필드는 `None`이면 직렬화에서 생략된다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient::{client_timestamp, null_as_default};

/// 시스템 일반 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    /// 머신 이름
    #[serde(deserialize_with = "null_as_default")]
    pub machine_name: String,
    /// 시리얼 번호 (머신 식별 키, 레코드 간 고유하지 않음)
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number: String,
    /// 모델명
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    /// OS 버전
    #[serde(deserialize_with = "null_as_default")]
    pub os_version: String,
    /// OS 세부 버전
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macos_version: Option<String>,
}

/// 프로세서 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuInfo {
    /// CPU 모델명
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    /// 코어 수
    #[serde(deserialize_with = "null_as_default")]
    pub cores: i64,
    /// 주파수 서술자
    #[serde(deserialize_with = "null_as_default")]
    pub frequency: String,
    /// 온도 서술자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
}

/// 메모리 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RamInfo {
    /// 전체 용량
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
    /// 사용량
    #[serde(deserialize_with = "null_as_default")]
    pub used: String,
    /// 가용량
    #[serde(deserialize_with = "null_as_default")]
    pub available: String,
    /// 메모리 종류 (예: LPDDR5)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
}

/// 저장 장치 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageInfo {
    /// 저장 장치 종류 (SSD, HDD 등 자유 텍스트)
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub storage_type: String,
    /// 전체 용량
    #[serde(deserialize_with = "null_as_default")]
    pub capacity: String,
    /// 사용량
    #[serde(deserialize_with = "null_as_default")]
    pub used: String,
    /// 가용량
    #[serde(deserialize_with = "null_as_default")]
    pub available: String,
    /// 상태 서술자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    /// 장치 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
}

/// 배터리 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryInfo {
    /// 충전 사이클 수
    #[serde(deserialize_with = "null_as_default")]
    pub cycle_count: i64,
    /// 상태 서술자
    #[serde(deserialize_with = "null_as_default")]
    pub health: String,
    /// 현재 용량 서술자
    #[serde(deserialize_with = "null_as_default")]
    pub capacity: String,
    /// 최대 용량 서술자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<String>,
    /// 배터리 컨디션
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// 충전 중 여부
    #[serde(deserialize_with = "null_as_default")]
    pub is_charging: bool,
    /// 전원 어댑터 서술자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_adapter: Option<String>,
}

/// 저장 전 진단 레코드 (정규화 결과, 검증 대상)
///
/// 다섯 개의 중첩 섹션은 필수이며 없으면 디코딩이 실패한다.
/// 섹션 내부의 스칼라 필드는 누락 시 기본값으로 채워져 검증 단계에서 걸러진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiagnostic {
    pub system_info: SystemInfo,
    pub cpu: CpuInfo,
    pub ram: RamInfo,
    pub storage: StorageInfo,
    pub battery: BatteryInfo,
    /// 결과 상태 (success / partial / failed, 자유 텍스트로 저장)
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// 진단 소요 시간 (초)
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,
    /// 클라이언트 보고 시각 (없거나 해석 불가면 서버 수신 시각 사용)
    #[serde(
        default,
        deserialize_with = "client_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

/// 저장된 진단 레코드
///
/// `id`와 `created_at`은 저장소가 삽입 시점에 한 번만 할당한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// 레코드 ID (자동 증가)
    pub id: i64,
    pub system_info: SystemInfo,
    pub cpu: CpuInfo,
    pub ram: RamInfo,
    pub storage: StorageInfo,
    pub battery: BatteryInfo,
    pub status: String,
    pub duration: f64,
    /// 클라이언트 보고 시각
    pub timestamp: DateTime<Utc>,
    /// 서버 저장 시각
    pub created_at: DateTime<Utc>,
}

impl NewDiagnostic {
    /// 빈 문자열로 들어온 선택 필드를 미설정(`None`)으로 정리
    pub fn clear_blank_optionals(&mut self) {
        for field in [
            &mut self.system_info.macos_version,
            &mut self.cpu.temperature,
            &mut self.ram.memory_type,
            &mut self.storage.health,
            &mut self.storage.device_name,
            &mut self.battery.max_capacity,
            &mut self.battery.condition,
            &mut self.battery.power_adapter,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
    }
}
