//! # hwdiag-core
//!
//! HWDIAG 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 수집 파이프라인을 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 진단 레코드 구조체 (serde Serialize/Deserialize)
//! - [`normalize`]: 정규/레거시 두 가지 JSON 형식을 하나의 레코드로 변환
//! - [`validation`]: 저장 전 필수 필드/값 범위 검증
//! - [`ingest`]: 정규화 → 검증 → 저장 파이프라인
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체와 로더

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod ports;
pub mod validation;
