//! 해외 종목 스크래퍼.
//!
//! 로이터 코드로 `/stock/{code}/basic` 또는 `/etf/{code}/basic`을 호출합니다.
//! ETF 여부는 종목 상세 URL에 `etf`가 포함되는지로 판단합니다.

use async_trait::async_trait;
use juga_core::{InstrumentMetadata, JugaResult, RawSnapshot};
use reqwest::Client;
use tracing::debug;

use super::{ScraperKind, StockScraper};
use crate::http::get_json;
use crate::models::{collect_total_infos, ForeignBasicResponse};

/// 해외 시세 스크래퍼.
pub struct ForeignScraper {
    client: Client,
    base_url: String,
}

impl ForeignScraper {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 종목 종류에 맞는 기본 시세 URL.
    pub fn endpoint_url(&self, metadata: &InstrumentMetadata) -> String {
        let category = if metadata.looks_like_etf() { "etf" } else { "stock" };
        format!(
            "{}/{}/{}/basic",
            self.base_url,
            category,
            metadata.reuters_code()
        )
    }
}

#[async_trait]
impl StockScraper for ForeignScraper {
    fn kind(&self) -> ScraperKind {
        ScraperKind::Foreign
    }

    async fn fetch(&self, metadata: &InstrumentMetadata) -> JugaResult<RawSnapshot> {
        let url = self.endpoint_url(metadata);
        debug!(reuters_code = metadata.reuters_code(), url = %url, "해외 시세 조회");

        let basic: ForeignBasicResponse =
            get_json(&self.client, "foreign.basic", &url, &[]).await?;

        if let Some(is_etf) = basic.is_etf {
            if is_etf != metadata.looks_like_etf() {
                debug!(
                    reuters_code = metadata.reuters_code(),
                    is_etf, "ETF 구분이 상세 URL과 다름"
                );
            }
        }

        let (total_infos, market_value) =
            collect_total_infos(basic.stock_item_total_infos.as_deref().unwrap_or_default());

        Ok(RawSnapshot {
            name: basic.stock_name,
            name_eng: basic.stock_name_eng,
            symbol_code: basic.symbol_code,
            close_price: basic.close_price,
            market_value,
            stock_exchange_name: basic.stock_exchange_name,
            compare_price: basic.compare_to_previous_close_price,
            compare_ratio: basic.fluctuations_ratio,
            total_infos,
            chart_urls: basic.image_charts.unwrap_or_default().into(),
            url: metadata.url().to_string(),
            market_status: basic.market_status,
            traded_at: basic.local_traded_at,
            over_market: basic
                .over_market_price_info
                .and_then(|info| info.into_quote()),
        })
    }
}
