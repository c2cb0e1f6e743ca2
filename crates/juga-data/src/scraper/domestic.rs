//! 국내 종목 스크래퍼.
//!
//! 기본 시세(`/api/stock/{code}/basic`)와 종합 정보(`/api/stock/{code}/integration`)
//! 두 엔드포인트를 동시에 호출한 뒤 하나의 스냅샷으로 합칩니다.

use async_trait::async_trait;
use juga_core::{InstrumentMetadata, JugaResult, RawSnapshot};
use reqwest::Client;
use tracing::{debug, warn};

use super::{ScraperKind, StockScraper};
use crate::http::get_json;
use crate::models::{collect_total_infos, DomesticBasicResponse, DomesticIntegrationResponse};

/// 정상 거래 상태의 거래정지 구분 이름.
const TRADING: &str = "TRADING";

/// 국내 시세 스크래퍼.
pub struct DomesticScraper {
    client: Client,
    base_url: String,
}

impl DomesticScraper {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn basic_url(&self, code: &str) -> String {
        format!("{}/api/stock/{}/basic", self.base_url, code)
    }

    fn integration_url(&self, code: &str) -> String {
        format!("{}/api/stock/{}/integration", self.base_url, code)
    }
}

#[async_trait]
impl StockScraper for DomesticScraper {
    fn kind(&self) -> ScraperKind {
        ScraperKind::Domestic
    }

    async fn fetch(&self, metadata: &InstrumentMetadata) -> JugaResult<RawSnapshot> {
        let code = metadata.symbol_code();
        let basic_url = self.basic_url(code);
        let integration_url = self.integration_url(code);

        debug!(code, "국내 시세 조회");

        let (basic, integration) = tokio::try_join!(
            get_json::<DomesticBasicResponse>(&self.client, "domestic.basic", &basic_url, &[]),
            get_json::<DomesticIntegrationResponse>(
                &self.client,
                "domestic.integration",
                &integration_url,
                &[]
            ),
        )?;

        if let Some(name) = basic
            .trade_stop_type
            .as_ref()
            .and_then(|stop| stop.name.as_deref())
            .filter(|name| *name != TRADING)
        {
            warn!(code, trade_stop = name, "거래정지 상태 종목");
        }

        let (total_infos, market_value) =
            collect_total_infos(integration.total_infos.as_deref().unwrap_or_default());

        Ok(RawSnapshot {
            // 국내 종목은 영문명을 별도로 제공하지 않음
            name_eng: Some(basic.stock_name.clone()),
            name: basic.stock_name,
            symbol_code: basic.item_code,
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
            over_market: None,
        })
    }
}
