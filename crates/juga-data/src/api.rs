//! 종목 조회 API.
//!
//! 검색어 해석부터 스크래퍼 선택, 스냅샷 정규화까지 하나로 묶습니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use juga_core::JugaConfig;
//! use juga_data::NaverStockApi;
//!
//! let api = NaverStockApi::new(&JugaConfig::default())?;
//! let (metadata, snapshot) = api.lookup("naver").await?;
//! println!("{} {}", metadata, snapshot.close_price());
//! ```

use juga_core::{InstrumentMetadata, JugaConfig, JugaError, JugaResult, StockSnapshot};
use reqwest::Client;
use tracing::info;

use crate::resolver::MetadataResolver;
use crate::scraper::{DomesticScraper, ForeignScraper, ScraperKind, StockScraper};

/// 네이버 증권 종목 조회 API.
///
/// 검색기와 스크래퍼가 하나의 HTTP 클라이언트(연결 풀)를 공유합니다.
pub struct NaverStockApi {
    resolver: MetadataResolver,
    domestic: DomesticScraper,
    foreign: ForeignScraper,
}

impl NaverStockApi {
    /// 설정으로 API 생성.
    pub fn new(config: &JugaConfig) -> JugaResult<Self> {
        let client = Client::builder()
            .timeout(config.http.timeout())
            .user_agent(&config.http.user_agent)
            .build()
            .map_err(|e| JugaError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            resolver: MetadataResolver::new(client.clone(), &config.endpoints, &config.resolver),
            domestic: DomesticScraper::new(client.clone(), &config.endpoints.domestic_base_url),
            foreign: ForeignScraper::new(client, &config.endpoints.foreign_base_url),
        })
    }

    /// 종목 검색기.
    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// 검색어로 종목 후보 목록 조회.
    pub async fn search(&self, query: &str) -> JugaResult<Vec<InstrumentMetadata>> {
        self.resolver.resolve(query).await
    }

    /// 검색어의 최상위 후보 하나를 반환합니다.
    ///
    /// 후보가 없으면 `InvalidStockQuery`로 실패합니다.
    pub async fn resolve_or_fail(&self, query: &str) -> JugaResult<InstrumentMetadata> {
        self.resolver
            .resolve(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| JugaError::InvalidStockQuery(query.to_string()))
    }

    /// 메타데이터에 맞는 스크래퍼로 시세를 조회하고 정규화합니다.
    pub async fn fetch_snapshot(&self, metadata: &InstrumentMetadata) -> JugaResult<StockSnapshot> {
        let scraper = self.scraper(ScraperKind::select(metadata));
        let raw = scraper.fetch(metadata).await?;

        info!(
            symbol = metadata.symbol_code(),
            scraper = %scraper.kind(),
            "시세 조회 완료"
        );

        Ok(StockSnapshot::from_raw(raw))
    }

    /// 검색어 하나로 종목 해석과 시세 조회를 모두 수행합니다.
    pub async fn lookup(&self, query: &str) -> JugaResult<(InstrumentMetadata, StockSnapshot)> {
        let metadata = self.resolve_or_fail(query).await?;
        let snapshot = self.fetch_snapshot(&metadata).await?;
        Ok((metadata, snapshot))
    }

    fn scraper(&self, kind: ScraperKind) -> &dyn StockScraper {
        match kind {
            ScraperKind::Domestic => &self.domestic,
            ScraperKind::Foreign => &self.foreign,
        }
    }
}
