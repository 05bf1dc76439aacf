//! 애플리케이션 설정 구조체.
//!
//! 웹 서버 포트, 저장소 경로 등 런타임 설정을 정의한다.
//! `config` crate를 통해 기본값 → 설정 파일 → 환경변수 순으로 로드한다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// 기본 설정 파일 이름 (확장자는 `config` crate가 탐색)
const DEFAULT_CONFIG_NAME: &str = "hwdiag";

/// 환경변수 접두사 (예: `HWDIAG__WEB__PORT`)
const ENV_PREFIX: &str = "HWDIAG";

/// 구형 배포와 호환되는 환경변수
const LEGACY_PORT_ENV: &str = "PORT";
const LEGACY_DB_PATH_ENV: &str = "DB_PATH";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
}

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 포트 (기본: 8080)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default = "default_allow_external")]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: default_allow_external(),
        }
    }
}

/// 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite 파일 경로
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl AppConfig {
    /// 설정 로드
    ///
    /// `file`이 주어지면 해당 파일이 반드시 존재해야 하고,
    /// 없으면 현재 디렉토리의 `hwdiag.{toml,json,...}`을 선택적으로 읽는다.
    pub fn load(file: Option<&Path>) -> Result<Self, CoreError> {
        Self::load_with_env(file, |key| std::env::var(key).ok())
    }

    /// 구형 환경변수 조회 함수를 지정하여 설정 로드
    pub fn load_with_env<F>(file: Option<&Path>, lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CoreError::Config(format!("설정 로드 실패: {e}")))?;

        let mut app_config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| CoreError::Config(format!("설정 해석 실패: {e}")))?;

        app_config.apply_legacy_env(lookup)?;
        Ok(app_config)
    }

    /// 구형 환경변수(`PORT`, `DB_PATH`) 적용
    pub fn apply_legacy_env<F>(&mut self, lookup: F) -> Result<(), CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(LEGACY_PORT_ENV).filter(|v| !v.is_empty()) {
            self.web.port = port
                .parse()
                .map_err(|_| CoreError::Config(format!("잘못된 {LEGACY_PORT_ENV} 값: {port}")))?;
        }
        if let Some(path) = lookup(LEGACY_DB_PATH_ENV).filter(|v| !v.is_empty()) {
            self.storage.db_path = PathBuf::from(path);
        }
        Ok(())
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_web_port() -> u16 {
    8080
}
fn default_allow_external() -> bool {
    true
}
fn default_db_path() -> PathBuf {
    PathBuf::from("./diagnostics.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn legacy_env_overrides() {
        let env: HashMap<&str, &str> = [("PORT", "9000"), ("DB_PATH", "/tmp/diag.db")].into();
        let mut config = AppConfig::default();
        config
            .apply_legacy_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.web.port, 9000);
        assert_eq!(config.storage.db_path, PathBuf::from("/tmp/diag.db"));
    }

    #[test]
    fn legacy_env_invalid_port() {
        let mut config = AppConfig::default();
        let err = config
            .apply_legacy_env(|k| (k == "PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn legacy_env_empty_values_ignored() {
        let mut config = AppConfig::default();
        config.apply_legacy_env(|_| Some(String::new())).unwrap();
        assert_eq!(config.web.port, 8080);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[web]\nport = 7070\nallow_external = false").unwrap();

        let config = AppConfig::load_with_env(Some(file.path()), |_| None).unwrap();
        assert_eq!(config.web.port, 7070);
        assert!(!config.web.allow_external);
        // 파일에 없는 섹션은 기본값
        assert_eq!(config.storage.db_path, PathBuf::from("./diagnostics.db"));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let result =
            AppConfig::load_with_env(Some(Path::new("/nonexistent/hwdiag.toml")), |_| None);
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
