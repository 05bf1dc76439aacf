//! 집계 통계.

use hwdiag_core::error::CoreError;
use hwdiag_core::models::statistics::Statistics;
use std::collections::BTreeMap;

use super::{parse_db_time, SqliteStorage};

impl SqliteStorage {
    /// 전체 건수, 고유 머신 수, 상태 분포, 최근 저장 시각
    pub(super) fn compute_statistics(&self) -> Result<Statistics, CoreError> {
        let conn = self.lock()?;

        let (total, unique, last): (i64, i64, Option<String>) = conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT serial_number), MAX(created_at) FROM diagnostics",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .map_err(|e| CoreError::Storage(format!("통계 조회 실패: {e}")))?;

        let mut stmt = conn
            .prepare_cached("SELECT status, COUNT(*) FROM diagnostics GROUP BY status")
            .map_err(|e| CoreError::Storage(format!("쿼리 준비 실패: {e}")))?;

        let status_distribution = stmt
            .query_map([], |row| {
                let status: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((status, count.max(0) as u64))
            })
            .map_err(|e| CoreError::Storage(format!("쿼리 실행 실패: {e}")))?
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map_err(|e| CoreError::Storage(format!("행 변환 실패: {e}")))?;

        let last_diagnostic = match last {
            Some(raw) => Some(
                parse_db_time(&raw)
                    .ok_or_else(|| CoreError::Storage(format!("잘못된 시각 형식: {raw}")))?,
            ),
            None => None,
        };

        Ok(Statistics {
            total_diagnostics: total.max(0) as u64,
            unique_machines: unique.max(0) as u64,
            status_distribution,
            last_diagnostic,
        })
    }
}
