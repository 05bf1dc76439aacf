//! 관대한 역직렬화 헬퍼.
//!
//! 구형 클라이언트는 값이 없을 때 `null`을 보내고, 보고 시각을 RFC 3339가 아닌
//! 형식으로 보내기도 한다. 둘 다 제출 전체를 거부할 사유로 보지 않는다.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// `null`을 기본값으로 취급 (타입이 다른 값은 여전히 에러)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 클라이언트 보고 시각
///
/// 해석할 수 없는 값은 미설정으로 두며, 저장 시 서버 시각으로 대체된다.
pub(crate) fn client_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => {
            let parsed = parse_client_time(&raw);
            if parsed.is_none() {
                debug!("해석할 수 없는 timestamp 무시: {raw}");
            }
            parsed
        }
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!("문자열이 아닌 timestamp 무시: {other}");
            None
        }
    };
    Ok(parsed)
}

/// RFC 3339, 또는 오프셋 없는 `YYYY-MM-DD[T ]HH:MM:SS[.f]` (UTC로 간주)
fn parse_client_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
