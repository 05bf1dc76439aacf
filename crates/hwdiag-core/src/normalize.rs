//! 수집 형식 정규화.
//!
//! 두 가지 JSON 형식을 받아 하나의 [`NewDiagnostic`]으로 변환한다.
//! - 정규 형식: `system_info` 키를 가진 중첩 객체, 구조 그대로 디코딩
//! - 레거시 형식: 평면 객체, [`LegacyClientReport`]로 디코딩 후 변환
//!
//! 형식 판별은 이 모듈 안에서만 일어나며, 이후 단계는 정규 레코드만 본다.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CoreError;
use crate::models::diagnostic::{
    BatteryInfo, CpuInfo, NewDiagnostic, RamInfo, StorageInfo, SystemInfo,
};
use crate::models::legacy::LegacyClientReport;

/// 정규 형식 판별 키
const CANONICAL_MARKER_KEY: &str = "system_info";

/// 레거시 형식에 없는 필드의 기본값
const DEFAULT_MODEL: &str = "Unknown";
const DEFAULT_OS_VERSION: &str = "macOS";
const DEFAULT_CPU_FREQUENCY: &str = "N/A";
const DEFAULT_STORAGE_TYPE: &str = "SSD";

/// 판별된 수집 보고
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingReport {
    /// 중첩 정규 형식
    Canonical(NewDiagnostic),
    /// 평면 레거시 형식
    Legacy(LegacyClientReport),
}

impl IncomingReport {
    /// JSON 객체의 형식을 판별하고 해당 구조로 디코딩
    pub fn decode(object: Map<String, Value>) -> Result<Self, CoreError> {
        let is_canonical = object.contains_key(CANONICAL_MARKER_KEY);
        let value = Value::Object(object);

        if is_canonical {
            let diagnostic = serde_json::from_value(value)
                .map_err(|e| CoreError::Format(format!("정규 형식 파싱 실패: {e}")))?;
            debug!("정규 형식 감지");
            Ok(IncomingReport::Canonical(diagnostic))
        } else {
            let report = serde_json::from_value(value)
                .map_err(|e| CoreError::Format(format!("레거시 형식 파싱 실패: {e}")))?;
            debug!("레거시 형식 감지");
            Ok(IncomingReport::Legacy(report))
        }
    }

    /// 정규 레코드로 변환
    pub fn into_canonical(self) -> NewDiagnostic {
        let mut diagnostic = match self {
            IncomingReport::Canonical(diagnostic) => diagnostic,
            IncomingReport::Legacy(report) => translate_legacy(report),
        };
        diagnostic.clear_blank_optionals();
        diagnostic
    }
}

/// 디코딩된 JSON 값을 정규 레코드로 정규화
///
/// 객체가 아닌 값은 `CoreError::Format`.
pub fn normalize(value: Value) -> Result<NewDiagnostic, CoreError> {
    match value {
        Value::Object(object) => Ok(IncomingReport::decode(object)?.into_canonical()),
        other => Err(CoreError::Format(format!(
            "JSON 객체가 필요합니다 (받은 값: {})",
            json_type_name(&other)
        ))),
    }
}

/// 요청 본문 바이트를 정규 레코드로 정규화
pub fn normalize_bytes(body: &[u8]) -> Result<NewDiagnostic, CoreError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| CoreError::Format(format!("JSON 디코딩 실패: {e}")))?;
    normalize(value)
}

/// 레거시 보고를 정규 레코드로 변환
///
/// 가용량은 `전체 - 사용`으로 계산하며 음수도 그대로 둔다.
pub fn translate_legacy(report: LegacyClientReport) -> NewDiagnostic {
    let ram_available = report.ram_total_gb - report.ram_used_gb;
    let storage_available = report.storage_total_gb - report.storage_used_gb;

    NewDiagnostic {
        system_info: SystemInfo {
            machine_name: report.machine_name,
            serial_number: report.serial_number,
            model: DEFAULT_MODEL.to_string(),
            os_version: DEFAULT_OS_VERSION.to_string(),
            macos_version: None,
        },
        cpu: CpuInfo {
            model: report.cpu_model,
            cores: report.cpu_cores,
            frequency: DEFAULT_CPU_FREQUENCY.to_string(),
            temperature: None,
        },
        ram: RamInfo {
            total: format_gb(report.ram_total_gb),
            used: format_gb(report.ram_used_gb),
            available: format_gb(ram_available),
            memory_type: None,
        },
        storage: StorageInfo {
            storage_type: DEFAULT_STORAGE_TYPE.to_string(),
            capacity: format_gb(report.storage_total_gb),
            used: format_gb(report.storage_used_gb),
            available: format_gb(storage_available),
            health: None,
            device_name: None,
        },
        battery: BatteryInfo {
            cycle_count: report.battery_cycle_count,
            health: report.battery_health,
            capacity: format_percentage(report.battery_percentage),
            max_capacity: None,
            condition: None,
            is_charging: false,
            power_adapter: None,
        },
        status: map_legacy_status(&report.status).to_string(),
        duration: report.test_duration_seconds,
        timestamp: None,
    }
}

/// GB 수치를 크기 서술자로 변환 (16 → "16.00 GB")
pub fn format_gb(value: f64) -> String {
    format!("{value:.2} GB")
}

/// 퍼센트 수치를 서술자로 변환 (85 → "85%")
pub fn format_percentage(value: i64) -> String {
    format!("{value}%")
}

/// 레거시 상태 어휘를 정규 어휘로 매핑
pub fn map_legacy_status(status: &str) -> &'static str {
    match status {
        "completed" => "success",
        "failed" => "failed",
        _ => "partial",
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical_payload() -> Value {
        json!({
            "system_info": {
                "machine_name": "Studio-01",
                "serial_number": "SN-001",
                "model": "Mac14,3",
                "os_version": "macOS 14.1",
                "macos_version": "Sonoma"
            },
            "cpu": { "model": "Apple M2", "cores": 8, "frequency": "3.5 GHz", "temperature": "41°C" },
            "ram": { "total": "24 GB", "used": "10 GB", "available": "14 GB", "type": "LPDDR5" },
            "storage": { "type": "SSD", "capacity": "1 TB", "used": "400 GB", "available": "600 GB" },
            "battery": { "cycle_count": 12, "health": "Normal", "capacity": "100%", "is_charging": false },
            "status": "success",
            "duration": 42.0
        })
    }

    #[test]
    fn canonical_shape_is_decoded_structurally() {
        let diagnostic = normalize(canonical_payload()).unwrap();
        assert_eq!(diagnostic.system_info.serial_number, "SN-001");
        assert_eq!(diagnostic.system_info.macos_version.as_deref(), Some("Sonoma"));
        assert_eq!(diagnostic.ram.memory_type.as_deref(), Some("LPDDR5"));
        assert_eq!(diagnostic.storage.health, None);
        assert_eq!(diagnostic.duration, 42.0);
    }

    #[test]
    fn canonical_shape_missing_section_is_format_error() {
        let mut payload = canonical_payload();
        payload.as_object_mut().unwrap().remove("battery");
        let err = normalize(payload).unwrap_err();
        assert!(matches!(err, CoreError::Format(_)));
    }

    #[test]
    fn canonical_shape_type_mismatch_is_format_error() {
        let mut payload = canonical_payload();
        payload["system_info"]["machine_name"] = json!(42);
        let err = normalize(payload).unwrap_err();
        assert!(matches!(err, CoreError::Format(_)));
    }

    #[test]
    fn legacy_ram_translation() {
        let diagnostic = normalize(json!({ "ram_total_gb": 16, "ram_used_gb": 4 })).unwrap();
        assert_eq!(diagnostic.ram.total, "16.00 GB");
        assert_eq!(diagnostic.ram.used, "4.00 GB");
        assert_eq!(diagnostic.ram.available, "12.00 GB");
    }

    #[test]
    fn legacy_storage_translation_and_defaults() {
        let diagnostic = normalize(json!({
            "machine_name": "MacBook Air",
            "serial_number": "FVFXK0",
            "cpu_model": "Apple M1",
            "cpu_cores": 8,
            "storage_total_gb": 256.5,
            "storage_used_gb": 100.25,
            "battery_health": "Good",
            "battery_cycle_count": 301,
            "battery_percentage": 85,
            "test_duration_seconds": 17,
            "status": "completed"
        }))
        .unwrap();

        assert_eq!(diagnostic.storage.capacity, "256.50 GB");
        assert_eq!(diagnostic.storage.used, "100.25 GB");
        assert_eq!(diagnostic.storage.available, "156.25 GB");
        assert_eq!(diagnostic.storage.storage_type, "SSD");
        assert_eq!(diagnostic.system_info.model, "Unknown");
        assert_eq!(diagnostic.system_info.os_version, "macOS");
        assert_eq!(diagnostic.cpu.frequency, "N/A");
        assert_eq!(diagnostic.battery.capacity, "85%");
        assert!(!diagnostic.battery.is_charging);
        assert_eq!(diagnostic.battery.max_capacity, None);
        assert_eq!(diagnostic.status, "success");
        assert_eq!(diagnostic.duration, 17.0);
    }

    #[test]
    fn legacy_negative_available_is_kept() {
        let diagnostic = normalize(json!({ "ram_total_gb": 8, "ram_used_gb": 10 })).unwrap();
        assert_eq!(diagnostic.ram.available, "-2.00 GB");
    }

    #[test]
    fn legacy_type_mismatch_is_format_error() {
        let err = normalize(json!({ "ram_total_gb": "sixteen" })).unwrap_err();
        assert!(matches!(err, CoreError::Format(_)));
    }

    #[test]
    fn legacy_status_mapping() {
        assert_eq!(map_legacy_status("completed"), "success");
        assert_eq!(map_legacy_status("failed"), "failed");
        assert_eq!(map_legacy_status(""), "partial");
        assert_eq!(map_legacy_status("running"), "partial");
        assert_eq!(map_legacy_status("COMPLETED"), "partial");
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(format_percentage(85), "85%");
        assert_eq!(format_percentage(0), "0%");
    }

    #[test]
    fn gb_formatting_has_two_decimals() {
        assert_eq!(format_gb(16.0), "16.00 GB");
        assert_eq!(format_gb(7.999), "8.00 GB");
    }

    #[test]
    fn non_object_is_format_error() {
        let err = normalize(json!([1, 2, 3])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn malformed_bytes_are_format_error() {
        let err = normalize_bytes(b"{not json").unwrap_err();
        assert!(matches!(err, CoreError::Format(_)));
    }

    #[test]
    fn decode_reports_detected_shape() {
        let object = json!({ "serial_number": "X" }).as_object().unwrap().clone();
        assert!(matches!(
            IncomingReport::decode(object).unwrap(),
            IncomingReport::Legacy(_)
        ));

        let object = canonical_payload().as_object().unwrap().clone();
        assert!(matches!(
            IncomingReport::decode(object).unwrap(),
            IncomingReport::Canonical(_)
        ));
    }

    #[test]
    fn canonical_null_scalar_decodes_as_default() {
        let mut payload = canonical_payload();
        payload["system_info"]["os_version"] = Value::Null;
        payload["battery"]["is_charging"] = Value::Null;

        let diagnostic = normalize(payload).unwrap();
        assert_eq!(diagnostic.system_info.os_version, "");
        assert!(!diagnostic.battery.is_charging);
    }

    #[test]
    fn canonical_null_required_scalar_fails_validation_not_decoding() {
        let mut payload = canonical_payload();
        payload["cpu"]["cores"] = Value::Null;

        let diagnostic = normalize(payload).unwrap();
        let err = crate::validation::validate(&diagnostic).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "cpu.cores"));
    }

    #[test]
    fn canonical_timestamp_without_offset_is_read_as_utc() {
        let mut payload = canonical_payload();
        payload["timestamp"] = json!("2024-05-01 09:30:00");

        let diagnostic = normalize(payload).unwrap();
        assert_eq!(
            diagnostic.timestamp.map(|t| t.to_rfc3339()),
            Some("2024-05-01T09:30:00+00:00".to_string())
        );
    }

    #[test]
    fn canonical_unreadable_timestamp_falls_back_to_unset() {
        for bad in [json!("next week"), json!(1714555800), Value::Null] {
            let mut payload = canonical_payload();
            payload["timestamp"] = bad;
            let diagnostic = normalize(payload).unwrap();
            assert_eq!(diagnostic.timestamp, None);
        }
    }

    #[test]
    fn legacy_null_fields_decode_as_zero() {
        let diagnostic = normalize(json!({
            "machine_name": "mbp",
            "serial_number": "S1",
            "cpu_model": "Intel",
            "cpu_cores": 4,
            "ram_total_gb": null,
            "battery_health": null,
            "status": null
        }))
        .unwrap();
        assert_eq!(diagnostic.ram.total, "0.00 GB");
        assert_eq!(diagnostic.battery.health, "");
        assert_eq!(diagnostic.status, "partial");
    }
}

