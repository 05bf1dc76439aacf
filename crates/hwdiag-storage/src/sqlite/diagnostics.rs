//! 진단 레코드 스토리지 (DiagnosticRepository 포트 구현).
//!
//! 저장, 최신순 목록, ID/시리얼 조회. 선택 필드는 NULL로 저장되고 `None`으로 복원된다.

use async_trait::async_trait;
use chrono::Utc;
use hwdiag_core::error::CoreError;
use hwdiag_core::models::diagnostic::{
    BatteryInfo, CpuInfo, DiagnosticRecord, NewDiagnostic, RamInfo, StorageInfo, SystemInfo,
};
use hwdiag_core::models::statistics::Statistics;
use hwdiag_core::ports::repository::DiagnosticRepository;
use rusqlite::Row;
use tracing::debug;

use super::{get_db_time, to_db_time, SqliteStorage};

/// 조회 컬럼 목록 (row_to_record와 순서 무관, 이름으로 읽음)
const SELECT_COLUMNS: &str = "
    id, machine_name, serial_number, model, os_version, macos_version,
    cpu_model, cpu_cores, cpu_frequency, cpu_temperature,
    ram_total, ram_used, ram_available, ram_type,
    storage_type, storage_capacity, storage_used, storage_available, storage_health, storage_device_name,
    battery_cycle_count, battery_health, battery_capacity, battery_max_capacity,
    battery_condition, battery_is_charging, battery_power_adapter,
    status, duration, timestamp, created_at";

const INSERT_SQL: &str = "
    INSERT INTO diagnostics (
        machine_name, serial_number, model, os_version, macos_version,
        cpu_model, cpu_cores, cpu_frequency, cpu_temperature,
        ram_total, ram_used, ram_available, ram_type,
        storage_type, storage_capacity, storage_used, storage_available, storage_health, storage_device_name,
        battery_cycle_count, battery_health, battery_capacity, battery_max_capacity,
        battery_condition, battery_is_charging, battery_power_adapter,
        status, duration, timestamp, created_at
    ) VALUES (
        ?1, ?2, ?3, ?4, ?5,
        ?6, ?7, ?8, ?9,
        ?10, ?11, ?12, ?13,
        ?14, ?15, ?16, ?17, ?18, ?19,
        ?20, ?21, ?22, ?23,
        ?24, ?25, ?26,
        ?27, ?28, ?29, ?30
    )";

/// 행 → 레코드 변환
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<DiagnosticRecord> {
    Ok(DiagnosticRecord {
        id: row.get("id")?,
        system_info: SystemInfo {
            machine_name: row.get("machine_name")?,
            serial_number: row.get("serial_number")?,
            model: row.get("model")?,
            os_version: row.get("os_version")?,
            macos_version: row.get("macos_version")?,
        },
        cpu: CpuInfo {
            model: row.get("cpu_model")?,
            cores: row.get("cpu_cores")?,
            frequency: row.get("cpu_frequency")?,
            temperature: row.get("cpu_temperature")?,
        },
        ram: RamInfo {
            total: row.get("ram_total")?,
            used: row.get("ram_used")?,
            available: row.get("ram_available")?,
            memory_type: row.get("ram_type")?,
        },
        storage: StorageInfo {
            storage_type: row.get("storage_type")?,
            capacity: row.get("storage_capacity")?,
            used: row.get("storage_used")?,
            available: row.get("storage_available")?,
            health: row.get("storage_health")?,
            device_name: row.get("storage_device_name")?,
        },
        battery: BatteryInfo {
            cycle_count: row.get("battery_cycle_count")?,
            health: row.get("battery_health")?,
            capacity: row.get("battery_capacity")?,
            max_capacity: row.get("battery_max_capacity")?,
            condition: row.get("battery_condition")?,
            is_charging: row.get("battery_is_charging")?,
            power_adapter: row.get("battery_power_adapter")?,
        },
        status: row.get("status")?,
        duration: row.get("duration")?,
        timestamp: get_db_time(row, "timestamp")?,
        created_at: get_db_time(row, "created_at")?,
    })
}

impl SqliteStorage {
    /// 조건부 목록 조회 공통 경로
    fn query_records(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::types::ToSql],
    ) -> Result<Vec<DiagnosticRecord>, CoreError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare_cached(sql)
            .map_err(|e| CoreError::Storage(format!("쿼리 준비 실패: {e}")))?;

        let records = stmt
            .query_map(params, row_to_record)
            .map_err(|e| CoreError::Storage(format!("쿼리 실행 실패: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::Storage(format!("행 변환 실패: {e}")))?;

        Ok(records)
    }
}

#[async_trait]
impl DiagnosticRepository for SqliteStorage {
    async fn create(&self, diagnostic: &NewDiagnostic) -> Result<i64, CoreError> {
        let s = &diagnostic.system_info;
        let c = &diagnostic.cpu;
        let r = &diagnostic.ram;
        let st = &diagnostic.storage;
        let b = &diagnostic.battery;

        // 시각은 잠금 안에서 찍어야 created_at 순서가 ID 순서와 일치한다
        let conn = self.lock()?;
        let created_at = Utc::now();
        let timestamp = diagnostic.timestamp.unwrap_or(created_at);

        conn.execute(
            INSERT_SQL,
            rusqlite::params![
                s.machine_name,
                s.serial_number,
                s.model,
                s.os_version,
                s.macos_version,
                c.model,
                c.cores,
                c.frequency,
                c.temperature,
                r.total,
                r.used,
                r.available,
                r.memory_type,
                st.storage_type,
                st.capacity,
                st.used,
                st.available,
                st.health,
                st.device_name,
                b.cycle_count,
                b.health,
                b.capacity,
                b.max_capacity,
                b.condition,
                b.is_charging,
                b.power_adapter,
                diagnostic.status,
                diagnostic.duration,
                to_db_time(&timestamp),
                to_db_time(&created_at),
            ],
        )
        .map_err(|e| CoreError::Storage(format!("진단 저장 실패: {e}")))?;

        let id = conn.last_insert_rowid();
        debug!("진단 저장: id={id}, serial={}", s.serial_number);
        Ok(id)
    }

    async fn list_all(&self, limit: i64) -> Result<Vec<DiagnosticRecord>, CoreError> {
        // SQLite에서 LIMIT -1은 제한 없음
        let limit = if limit > 0 { limit } else { -1 };
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM diagnostics ORDER BY created_at DESC, id DESC LIMIT ?1"
        );
        let records = self.query_records(&sql, rusqlite::params![limit])?;
        debug!("진단 목록 조회: {}건", records.len());
        Ok(records)
    }

    async fn get_by_id(&self, id: i64) -> Result<DiagnosticRecord, CoreError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM diagnostics WHERE id = ?1");
        let conn = self.lock()?;

        let result = conn.query_row(&sql, rusqlite::params![id], row_to_record);

        match result {
            Ok(record) => Ok(record),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(CoreError::NotFound {
                resource_type: "diagnostic".to_string(),
                id: id.to_string(),
            }),
            Err(e) => Err(CoreError::Storage(format!("진단 조회 실패: {e}"))),
        }
    }

    async fn list_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Vec<DiagnosticRecord>, CoreError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM diagnostics WHERE serial_number = ?1 ORDER BY created_at DESC, id DESC"
        );
        let records = self.query_records(&sql, rusqlite::params![serial_number])?;
        debug!(
            "시리얼 {serial_number} 진단 조회: {}건",
            records.len()
        );
        Ok(records)
    }

    async fn statistics(&self) -> Result<Statistics, CoreError> {
        self.compute_statistics()
    }
}
