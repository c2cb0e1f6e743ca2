//! 시세 스크래퍼.
//!
//! 종목 메타데이터의 국가 구분에 따라 국내/해외 스크래퍼 중 하나를 선택합니다.
//! 스크래퍼는 정규화 이전의 `RawSnapshot`을 반환하고, 표시용 정규화는
//! `StockSnapshot::from_raw`에서 한 번만 수행됩니다.

mod domestic;
mod foreign;

pub use domestic::DomesticScraper;
pub use foreign::ForeignScraper;

use std::fmt;

use async_trait::async_trait;
use juga_core::{InstrumentMetadata, JugaResult, RawSnapshot};

/// 스크래퍼 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScraperKind {
    /// 국내 상장 종목
    Domestic,
    /// 해외 상장 종목 (주식/ETF)
    Foreign,
}

impl ScraperKind {
    /// 메타데이터로 스크래퍼 종류를 결정합니다.
    ///
    /// 국가 코드가 `KOR`이 아니면 (비어 있는 경우 포함) 해외로 분류합니다.
    pub fn select(metadata: &InstrumentMetadata) -> Self {
        if metadata.is_global() {
            Self::Foreign
        } else {
            Self::Domestic
        }
    }
}

impl fmt::Display for ScraperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domestic => write!(f, "domestic"),
            Self::Foreign => write!(f, "foreign"),
        }
    }
}

/// 시세 스크래퍼 trait.
#[async_trait]
pub trait StockScraper: Send + Sync {
    /// 스크래퍼 종류.
    fn kind(&self) -> ScraperKind;

    /// 종목 하나의 시세를 가져옵니다.
    ///
    /// 필요한 호출 중 하나라도 실패하면 전체가 실패합니다.
    async fn fetch(&self, metadata: &InstrumentMetadata) -> JugaResult<RawSnapshot>;
}
