//! 종목 메타데이터.
//!
//! 자동완성 결과 한 건을 정규화한 종목 식별 정보입니다.
//! 국내/해외 분류(`is_global`)는 생성 시점에 한 번만 계산되며
//! 스크래퍼 선택의 유일한 기준입니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 국내 종목의 국가 코드.
pub const DOMESTIC_NATION_CODE: &str = "KOR";

/// 종목 메타데이터의 원본 필드 묶음.
///
/// 자동완성 응답을 파싱한 결과이며, `InstrumentMetadata`로 변환될 때
/// 파생 필드가 계산됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// 종목 코드 (예: 035420, MSFT)
    pub symbol_code: String,
    /// 표시 이름
    pub display_name: String,
    /// 거래소 코드 (예: KOSPI, NASDAQ)
    pub stock_exchange_code: String,
    /// 거래소 이름 (예: 코스피, 나스닥 증권거래소)
    pub stock_exchange_name: String,
    /// 종목 상세 페이지 절대 URL
    pub url: String,
    /// 해외 시세 조회용 로이터 코드 (예: MSFT.O)
    pub reuters_code: String,
    /// 국가 코드 (예: KOR, USA)
    pub nation_code: String,
    /// 국가 이름
    pub nation_name: String,
}

/// 종목 메타데이터.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InstrumentRecord")]
pub struct InstrumentMetadata {
    symbol_code: String,
    display_name: String,
    stock_exchange_code: String,
    stock_exchange_name: String,
    url: String,
    reuters_code: String,
    nation_code: String,
    nation_name: String,
    is_global: bool,
}

impl From<InstrumentRecord> for InstrumentMetadata {
    fn from(record: InstrumentRecord) -> Self {
        let is_global = record.nation_code != DOMESTIC_NATION_CODE;

        Self {
            symbol_code: record.symbol_code,
            display_name: record.display_name,
            stock_exchange_code: record.stock_exchange_code,
            stock_exchange_name: record.stock_exchange_name,
            url: record.url,
            reuters_code: record.reuters_code,
            nation_code: record.nation_code,
            nation_name: record.nation_name,
            is_global,
        }
    }
}

impl InstrumentMetadata {
    pub fn symbol_code(&self) -> &str {
        &self.symbol_code
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn stock_exchange_code(&self) -> &str {
        &self.stock_exchange_code
    }

    pub fn stock_exchange_name(&self) -> &str {
        &self.stock_exchange_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn reuters_code(&self) -> &str {
        &self.reuters_code
    }

    pub fn nation_code(&self) -> &str {
        &self.nation_code
    }

    pub fn nation_name(&self) -> &str {
        &self.nation_name
    }

    /// 해외 상장 종목 여부 (`nation_code != "KOR"`).
    pub fn is_global(&self) -> bool {
        self.is_global
    }

    /// 상세 페이지 URL이 ETF 경로를 가리키는지 여부.
    pub fn looks_like_etf(&self) -> bool {
        self.url.to_lowercase().contains("etf")
    }
}

impl fmt::Display for InstrumentMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{} / {}] {}",
            self.display_name,
            self.symbol_code,
            self.stock_exchange_name,
            self.nation_name,
            self.url
        )
    }
}
