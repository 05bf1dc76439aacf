//! # hwdiag-storage
//!
//! 로컬 저장소 어댑터.
//! SQLite 기반 진단 레코드 저장과 집계 통계를 담당한다.
//!
//! ## 모듈
//! - `sqlite`: 진단 저장소 (DiagnosticRepository 구현)
//! - `schema`: 테이블/인덱스 생성

pub mod schema;
pub mod sqlite;
