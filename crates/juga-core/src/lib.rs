//! # Juga Core
//!
//! 주가 조회 도구의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 종목 메타데이터 (`InstrumentMetadata`) 및 국내/해외 분류
//! - 정규화된 시세 스냅샷 (`StockSnapshot`)과 1회성 정규화 함수
//! - 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;
