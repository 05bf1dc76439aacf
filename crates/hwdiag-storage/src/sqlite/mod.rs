//! SQLite 저장소 어댑터.
//!
//! `DiagnosticRepository` 포트 구현.
//!
//! # 모듈 구조
//! - `diagnostics`: 레코드 저장/조회 (DiagnosticRepository 포트)
//! - `statistics`: 집계 통계

mod diagnostics;
mod statistics;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use hwdiag_core::error::CoreError;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::schema;

/// SQLite 저장소 (`DiagnosticRepository` 포트 구현)
///
/// 연결은 `Mutex`로 보호되며 모든 요청이 공유한다.
/// 값이 drop되면 연결이 닫힌다.
pub struct SqliteStorage {
    pub(super) conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// 파일 기반 SQLite 저장소 생성
    ///
    /// 상위 디렉토리가 없으면 생성한다.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| CoreError::Storage(format!("SQLite 열기 실패: {e}")))?;

        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;
            ",
        )
        .map_err(|e| CoreError::Storage(format!("PRAGMA 설정 실패: {e}")))?;

        schema::ensure_schema(&conn)
            .map_err(|e| CoreError::Storage(format!("스키마 생성 실패: {e}")))?;

        info!("SQLite 저장소 초기화: {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// 인메모리 SQLite 저장소 생성 (테스트용)
    pub fn open_in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CoreError::Storage(format!("인메모리 SQLite 생성 실패: {e}")))?;

        schema::ensure_schema(&conn)
            .map_err(|e| CoreError::Storage(format!("스키마 생성 실패: {e}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// 연결 잠금 획득
    pub(super) fn lock(&self) -> Result<MutexGuard<'_, Connection>, CoreError> {
        self.conn
            .lock()
            .map_err(|e| CoreError::Storage(format!("잠금 획득 실패: {e}")))
    }
}

/// DB 저장용 시각 문자열 (UTC, 마이크로초 고정 자릿수)
///
/// 고정 자릿수라 문자열 정렬이 시간순 정렬과 같다.
pub(crate) fn to_db_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// DB 시각 문자열 파싱
///
/// RFC3339 외에 `YYYY-MM-DD HH:MM:SS[.f][+zz:zz]` 형식(SQLite CURRENT_TIMESTAMP 등)도 허용한다.
pub(crate) fn parse_db_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// 행에서 시각 컬럼 읽기
pub(crate) fn get_db_time(row: &Row<'_>, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    parse_db_time(&raw).ok_or_else(|| {
        let index = row.as_ref().column_index(column).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("잘못된 시각 형식: {raw}").into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn db_time_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(5);
        assert_eq!(to_db_time(&a), "2024-01-01T00:00:00.000000Z");
        assert!(to_db_time(&a) < to_db_time(&b));
    }

    #[test]
    fn parse_db_time_accepts_known_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap();
        assert_eq!(parse_db_time("2024-03-05T10:20:30Z"), Some(expected));
        assert_eq!(parse_db_time("2024-03-05 10:20:30"), Some(expected));
        assert_eq!(parse_db_time("2024-03-05 12:20:30+02:00"), Some(expected));
        assert_eq!(parse_db_time("yesterday"), None);
    }

    #[test]
    fn open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("diagnostics.db");

        let storage = SqliteStorage::open(&path);
        assert!(storage.is_ok());
        assert!(path.exists());
    }
}
