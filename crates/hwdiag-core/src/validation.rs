//! 진단 레코드 검증.
//!
//! 구조적으로는 올바르지만 의미상 불완전한 레코드를 저장 전에 거부한다.
//! 순수 함수이며 I/O가 없다. 용량 일관성, 소요 시간 부호, 상태 어휘는 검사하지 않는다.

use crate::error::CoreError;
use crate::models::diagnostic::NewDiagnostic;

/// 진단 레코드 검증
///
/// 첫 번째로 위반된 규칙을 `CoreError::Validation`으로 반환한다.
pub fn validate(diagnostic: &NewDiagnostic) -> Result<(), CoreError> {
    require_non_empty(
        "system_info.machine_name",
        &diagnostic.system_info.machine_name,
    )?;
    require_non_empty(
        "system_info.serial_number",
        &diagnostic.system_info.serial_number,
    )?;
    require_non_empty("system_info.model", &diagnostic.system_info.model)?;
    require_non_empty("cpu.model", &diagnostic.cpu.model)?;

    if diagnostic.cpu.cores <= 0 {
        return Err(CoreError::validation(
            "cpu.cores",
            format!("0보다 커야 합니다 (받은 값: {})", diagnostic.cpu.cores),
        ));
    }

    require_non_empty("ram.total", &diagnostic.ram.total)?;
    require_non_empty("storage.type", &diagnostic.storage.storage_type)?;

    if diagnostic.battery.cycle_count < 0 {
        return Err(CoreError::validation(
            "battery.cycle_count",
            format!(
                "음수일 수 없습니다 (받은 값: {})",
                diagnostic.battery.cycle_count
            ),
        ));
    }

    require_non_empty("status", &diagnostic.status)?;

    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::validation(field, "필수 항목입니다"));
    }
    Ok(())
}
