//! HWDIAG 도메인 모델.
//!
//! 클라이언트-서버 간 공유하는 진단 데이터 구조체를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod diagnostic;
pub mod legacy;
mod lenient;
pub mod statistics;
