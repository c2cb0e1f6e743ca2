//! 네이버 증권 데이터 조회.
//!
//! 이 crate는 다음을 제공합니다:
//! - 자동완성 기반 종목 검색 (LRU 캐시 포함)
//! - 국내/해외 시세 스크래퍼와 스크래퍼 선택
//! - 검색부터 스냅샷 정규화까지 묶은 `NaverStockApi`

pub mod api;
mod http;
pub mod models;
pub mod resolver;
pub mod scraper;

pub use api::NaverStockApi;
pub use resolver::MetadataResolver;
pub use scraper::{DomesticScraper, ForeignScraper, ScraperKind, StockScraper};

pub use juga_core::{JugaError, JugaResult};
