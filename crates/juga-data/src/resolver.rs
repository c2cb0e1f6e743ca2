//! 자동완성 기반 종목 검색.
//!
//! 검색어 하나에 자동완성 API를 한 번 호출하고, 후보를 업스트림 순위
//! 그대로 `InstrumentMetadata`로 변환합니다. 결과는 검색어 문자열을 키로
//! 하는 LRU 캐시에 보관하며 시간 만료 없이 용량 초과 시에만 밀려납니다.
//!
//! ## 지원 형식
//! - `legacy`: `ac.finance.naver.com` 위치 기반 배열
//! - `front_api`: `m.stock.naver.com/front-api` 객체 목록

use std::sync::Arc;

use juga_core::{
    AutocompleteSource, EndpointConfig, InstrumentMetadata, InstrumentRecord, JugaError,
    JugaResult, ResolverConfig, DOMESTIC_NATION_CODE,
};
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use reqwest::Client;
use tracing::{debug, info};

use crate::http::get_json;
use crate::models::{FrontAutocompleteItem, FrontAutocompleteResponse, LegacyAutocompleteResponse};

const ENDPOINT: &str = "autocomplete";

/// 국내 시장 이름 (국가 정보가 없는 자동완성 후보의 분류용).
const DOMESTIC_MARKETS: [&str; 2] = ["코스피", "코스닥"];
const DOMESTIC_NATION_NAME: &str = "대한민국";

/// 위치 기반 후보의 최소 필드 수 (코드, 이름, 시장, URL, 로이터 코드).
const MIN_LEGACY_FIELDS: usize = 5;

/// 종목 검색기.
pub struct MetadataResolver {
    client: Client,
    source: AutocompleteSource,
    url: String,
    detail_base_url: String,
    cache: Cache<String, Arc<Vec<InstrumentMetadata>>>,
}

impl MetadataResolver {
    /// 새 검색기 생성.
    pub fn new(client: Client, endpoints: &EndpointConfig, settings: &ResolverConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(settings.cache_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            client,
            source: endpoints.autocomplete_source,
            url: endpoints.autocomplete_url().to_string(),
            detail_base_url: endpoints.detail_base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// 검색어로 종목 후보 조회 (업스트림 순위 유지).
    ///
    /// 결과가 없으면 빈 목록을 반환합니다. 공백뿐인 검색어는
    /// 네트워크 호출 없이 `InvalidStockQuery`로 실패합니다.
    pub async fn resolve(&self, query: &str) -> JugaResult<Vec<InstrumentMetadata>> {
        if query.trim().is_empty() {
            return Err(JugaError::InvalidStockQuery(query.to_string()));
        }

        if let Some(cached) = self.cache.get(query).await {
            debug!(query, "autocomplete cache hit");
            return Ok(cached.as_ref().clone());
        }

        let results = match self.source {
            AutocompleteSource::Legacy => self.fetch_legacy(query).await?,
            AutocompleteSource::FrontApi => self.fetch_front(query).await?,
        };

        info!(query, matches = results.len(), "autocomplete resolved");

        // 동시에 같은 키를 채우는 경우 마지막 값이 남지만 내용은 동일
        self.cache
            .insert(query.to_string(), Arc::new(results.clone()))
            .await;
        // 버퍼된 조회 기록을 반영해야 최근 조회 항목이 밀려나지 않음
        self.cache.run_pending_tasks().await;

        Ok(results)
    }

    /// 캐시된 검색어 수.
    pub async fn cache_size(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// 캐시 비우기.
    pub async fn clear_cache(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    async fn fetch_legacy(&self, query: &str) -> JugaResult<Vec<InstrumentMetadata>> {
        let params = [
            ("q", query),
            ("q_enc", "euc-kr"),
            ("t_koreng", "1"),
            ("st", "111"),
            ("r_lt", "111"),
        ];
        let response: LegacyAutocompleteResponse =
            get_json(&self.client, ENDPOINT, &self.url, &params).await?;

        response
            .items
            .iter()
            .flatten()
            .map(|candidate| self.legacy_candidate(candidate))
            .collect()
    }

    async fn fetch_front(&self, query: &str) -> JugaResult<Vec<InstrumentMetadata>> {
        let params = [("query", query), ("target", "stock,index,marketindicator,coin")];
        let response: FrontAutocompleteResponse =
            get_json(&self.client, ENDPOINT, &self.url, &params).await?;

        if !response.is_success {
            return Err(JugaError::upstream(
                ENDPOINT,
                format!(
                    "autocomplete failed ({}): {}",
                    response.detail_code.unwrap_or_default(),
                    response.message.unwrap_or_default()
                ),
            ));
        }

        Ok(response
            .result
            .map(|result| result.items)
            .unwrap_or_default()
            .into_iter()
            .map(|item| self.front_item(item))
            .collect())
    }

    /// 위치 기반 후보 하나를 변환합니다.
    ///
    /// 각 위치는 단일 원소 배열이며 첫 원소만 사용합니다.
    fn legacy_candidate(&self, candidate: &[Vec<String>]) -> JugaResult<InstrumentMetadata> {
        if candidate.len() < MIN_LEGACY_FIELDS {
            return Err(JugaError::schema(
                ENDPOINT,
                format!(
                    "candidate has {} fields, expected at least {}",
                    candidate.len(),
                    MIN_LEGACY_FIELDS
                ),
            ));
        }

        let field = |index: usize| -> String {
            candidate
                .get(index)
                .and_then(|values| values.first())
                .cloned()
                .unwrap_or_default()
        };

        let market = field(2);
        let (nation_code, nation_name) = if candidate.len() > 5 {
            (field(5), field(6))
        } else if DOMESTIC_MARKETS.contains(&market.as_str()) {
            (
                DOMESTIC_NATION_CODE.to_string(),
                DOMESTIC_NATION_NAME.to_string(),
            )
        } else {
            (String::new(), String::new())
        };

        Ok(InstrumentRecord {
            symbol_code: field(0),
            display_name: field(1),
            stock_exchange_code: market.clone(),
            stock_exchange_name: market,
            url: self.absolute_url(&field(3)),
            reuters_code: field(4),
            nation_code,
            nation_name,
        }
        .into())
    }

    fn front_item(&self, item: FrontAutocompleteItem) -> InstrumentMetadata {
        InstrumentRecord {
            symbol_code: item.code,
            display_name: item.name,
            stock_exchange_code: item.type_code.unwrap_or_default(),
            stock_exchange_name: item.type_name.unwrap_or_default(),
            url: self.absolute_url(&item.url),
            reuters_code: item.reuters_code.unwrap_or_default(),
            nation_code: item.nation_code.unwrap_or_default(),
            nation_name: item.nation_name.unwrap_or_default(),
        }
        .into()
    }

    /// 자동완성의 상대 경로를 상세 페이지 절대 URL로 변환합니다.
    fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.detail_base_url, path)
        } else {
            format!("{}/{}", self.detail_base_url, path)
        }
    }
}
