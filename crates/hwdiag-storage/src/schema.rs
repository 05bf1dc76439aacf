//! 스키마 생성.
//!
//! 단일 `diagnostics` 테이블과 조회용 인덱스. 이미 존재하면 아무것도 하지 않는다.

use rusqlite::Connection;
use tracing::info;

/// 테이블/인덱스 생성 (멱등)
pub fn ensure_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS diagnostics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            machine_name TEXT NOT NULL,
            serial_number TEXT NOT NULL,
            model TEXT NOT NULL,
            os_version TEXT NOT NULL,
            macos_version TEXT,

            cpu_model TEXT NOT NULL,
            cpu_cores INTEGER NOT NULL,
            cpu_frequency TEXT NOT NULL,
            cpu_temperature TEXT,

            ram_total TEXT NOT NULL,
            ram_used TEXT NOT NULL,
            ram_available TEXT NOT NULL,
            ram_type TEXT,

            storage_type TEXT NOT NULL,
            storage_capacity TEXT NOT NULL,
            storage_used TEXT NOT NULL,
            storage_available TEXT NOT NULL,
            storage_health TEXT,
            storage_device_name TEXT,

            battery_cycle_count INTEGER NOT NULL,
            battery_health TEXT NOT NULL,
            battery_capacity TEXT NOT NULL,
            battery_max_capacity TEXT,
            battery_condition TEXT,
            battery_is_charging BOOLEAN NOT NULL,
            battery_power_adapter TEXT,

            status TEXT NOT NULL,
            duration REAL NOT NULL,
            timestamp DATETIME NOT NULL,
            created_at DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_diagnostics_serial_number ON diagnostics(serial_number);
        CREATE INDEX IF NOT EXISTS idx_diagnostics_created_at ON diagnostics(created_at);
        CREATE INDEX IF NOT EXISTS idx_diagnostics_status ON diagnostics(status);
        ",
    )?;

    info!("diagnostics 테이블 준비 완료");
    Ok(())
}
