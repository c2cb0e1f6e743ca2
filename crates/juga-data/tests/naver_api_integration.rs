//! 네이버 증권 API 통합 테스트 (mockito 서버 사용).

use juga_core::{
    AutocompleteSource, EndpointConfig, InstrumentMetadata, InstrumentRecord, JugaConfig,
    JugaError,
};
use juga_data::NaverStockApi;
use mockito::{Matcher, Server, ServerGuard};

const LEGACY_NAVER: &str = include_str!("fixtures/legacy_naver.json");
const FRONT_MICROSOFT: &str = include_str!("fixtures/front_microsoft.json");
const DOMESTIC_BASIC: &str = include_str!("fixtures/domestic_basic_035420.json");
const DOMESTIC_INTEGRATION: &str = include_str!("fixtures/domestic_integration_035420.json");
const FOREIGN_MSFT: &str = include_str!("fixtures/foreign_msft.json");
const FOREIGN_QQQ: &str = include_str!("fixtures/foreign_qqq_etf.json");

const LEGACY_PATH: &str = "/ac";
const FRONT_PATH: &str = "/front-api/v1/search/autoComplete";

/// 모든 엔드포인트를 한 서버로 향하게 하는 설정.
fn config_for(server: &ServerGuard, source: AutocompleteSource) -> JugaConfig {
    split_config(server, server, source)
}

/// 국내 API는 `domestic`, 나머지는 `foreign` 서버로 향하는 설정.
fn split_config(
    domestic: &ServerGuard,
    foreign: &ServerGuard,
    source: AutocompleteSource,
) -> JugaConfig {
    let foreign_url = foreign.url();
    let mut config = JugaConfig::default();
    config.endpoints = EndpointConfig {
        autocomplete_source: source,
        legacy_autocomplete_url: format!("{}{}", foreign_url, LEGACY_PATH),
        front_autocomplete_url: format!("{}{}", foreign_url, FRONT_PATH),
        domestic_base_url: domestic.url(),
        foreign_base_url: foreign_url.clone(),
        detail_base_url: foreign_url,
    };
    config
}

fn foreign_metadata(url: &str, reuters_code: &str) -> InstrumentMetadata {
    InstrumentRecord {
        symbol_code: reuters_code.split('.').next().unwrap_or_default().to_string(),
        display_name: reuters_code.to_string(),
        stock_exchange_code: "NASDAQ".to_string(),
        stock_exchange_name: "NASDAQ".to_string(),
        url: url.to_string(),
        reuters_code: reuters_code.to_string(),
        nation_code: "USA".to_string(),
        nation_name: "미국".to_string(),
    }
    .into()
}

fn domestic_metadata() -> InstrumentMetadata {
    InstrumentRecord {
        symbol_code: "035420".to_string(),
        display_name: "NAVER".to_string(),
        stock_exchange_code: "코스피".to_string(),
        stock_exchange_name: "코스피".to_string(),
        url: "https://finance.naver.com/item/main.nhn?code=035420".to_string(),
        reuters_code: "035420".to_string(),
        nation_code: "KOR".to_string(),
        nation_name: "대한민국".to_string(),
    }
    .into()
}

async fn mock_domestic(server: &mut ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let basic = server
        .mock("GET", "/api/stock/035420/basic")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(DOMESTIC_BASIC)
        .create_async()
        .await;
    let integration = server
        .mock("GET", "/api/stock/035420/integration")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(DOMESTIC_INTEGRATION)
        .create_async()
        .await;
    (basic, integration)
}

// ==================== 종목 검색 ====================

#[tokio::test]
async fn test_legacy_autocomplete_resolves_naver() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LEGACY_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "naver".into()),
            Matcher::UrlEncoded("q_enc".into(), "euc-kr".into()),
            Matcher::UrlEncoded("t_koreng".into(), "1".into()),
            Matcher::UrlEncoded("st".into(), "111".into()),
            Matcher::UrlEncoded("r_lt".into(), "111".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/javascript; charset=utf-8")
        .with_body(LEGACY_NAVER)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    let results = api.search("naver").await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);

    let top = &results[0];
    assert_eq!(top.symbol_code(), "035420");
    assert_eq!(top.display_name(), "NAVER");
    assert_eq!(top.stock_exchange_code(), "코스피");
    assert_eq!(top.stock_exchange_name(), "코스피");
    assert_eq!(top.nation_code(), "KOR");
    assert_eq!(
        top.url(),
        format!("{}/item/main.nhn?code=035420", server.url())
    );
    assert!(!top.is_global());

    // 국가 정보가 없는 해외 후보
    assert_eq!(results[1].reuters_code(), "NHNC.O");
    assert!(results[1].is_global());
}

#[tokio::test]
async fn test_front_autocomplete_resolves_microsoft() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", FRONT_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "microsoft".into()),
            Matcher::UrlEncoded("target".into(), "stock,index,marketindicator,coin".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(FRONT_MICROSOFT)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::FrontApi)).unwrap();
    let results = api.search("microsoft").await.unwrap();

    mock.assert_async().await;
    let reuters: Vec<_> = results.iter().map(|m| m.reuters_code()).collect();
    let nations: Vec<_> = results.iter().map(|m| m.nation_code()).collect();
    assert_eq!(reuters, vec!["MSFT.O", "4338.HK"]);
    assert_eq!(nations, vec!["USA", "HKG"]);
    assert!(results.iter().all(|m| m.is_global()));
    assert_eq!(results[0].stock_exchange_name(), "나스닥 증권거래소");
    assert_eq!(
        results[0].url(),
        format!("{}/worldstock/stock/MSFT.O/total", server.url())
    );
}

#[tokio::test]
async fn test_front_autocomplete_failure_is_upstream_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", FRONT_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"isSuccess": false, "detailCode": "E01", "message": "bad request"}"#)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::FrontApi)).unwrap();
    let err = api.search("microsoft").await.unwrap_err();

    match err {
        JugaError::Upstream { endpoint, reason } => {
            assert_eq!(endpoint, "autocomplete");
            assert!(reason.contains("E01"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_query_is_invalid() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", LEGACY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"query": ["zzzzzz"], "items": [[]]}"#)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();

    assert!(api.search("zzzzzz").await.unwrap().is_empty());

    let err = api.lookup("zzzzzz").await.unwrap_err();
    assert!(err.is_invalid_query());
    assert!(err.to_string().contains("zzzzzz"));
}

#[tokio::test]
async fn test_repeated_query_hits_cache() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LEGACY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(LEGACY_NAVER)
        .expect(1)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    let first = api.search("naver").await.unwrap();
    let second = api.search("naver").await.unwrap();

    mock.assert_async().await;
    assert_eq!(first, second);
    assert_eq!(api.resolver().cache_size().await, 1);

    api.resolver().clear_cache().await;
    assert_eq!(api.resolver().cache_size().await, 0);
}

#[tokio::test]
async fn test_failed_query_is_not_cached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LEGACY_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .expect(2)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    assert!(api.search("naver").await.is_err());
    assert!(api.search("naver").await.is_err());

    mock.assert_async().await;
    assert_eq!(api.resolver().cache_size().await, 0);
}

#[tokio::test]
async fn test_cache_stays_within_capacity() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", LEGACY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(LEGACY_NAVER)
        .create_async()
        .await;

    let mut config = config_for(&server, AutocompleteSource::Legacy);
    config.resolver.cache_capacity = 3;
    let api = NaverStockApi::new(&config).unwrap();

    for i in 0..10 {
        api.search(&format!("query-{i}")).await.unwrap();
    }

    assert!(api.resolver().cache_size().await <= 3);
}

#[tokio::test]
async fn test_cache_evicts_least_recently_used() {
    let mut server = Server::new_async().await;
    let mut mocks = Vec::new();
    for (query, calls) in [("a", 1), ("b", 2), ("c", 1), ("d", 1)] {
        let mock = server
            .mock("GET", LEGACY_PATH)
            .match_query(Matcher::UrlEncoded("q".into(), query.into()))
            .with_status(200)
            .with_body(LEGACY_NAVER)
            .expect(calls)
            .create_async()
            .await;
        mocks.push(mock);
    }

    let mut config = config_for(&server, AutocompleteSource::Legacy);
    config.resolver.cache_capacity = 3;
    let api = NaverStockApi::new(&config).unwrap();

    for query in ["a", "b", "c", "a", "d"] {
        api.search(query).await.unwrap();
    }
    // 최근에 조회한 "a"는 남고 가장 오래 쓰지 않은 "b"가 밀려남
    api.search("a").await.unwrap();
    api.search("b").await.unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
}

// ==================== 스크래퍼 선택 ====================

#[tokio::test]
async fn test_domestic_and_foreign_use_disjoint_endpoints() {
    let mut domestic = Server::new_async().await;
    let mut foreign = Server::new_async().await;

    let (domestic_basic, domestic_integration) = mock_domestic(&mut domestic).await;
    let foreign_basic = foreign
        .mock("GET", "/stock/MSFT.O/basic")
        .with_status(200)
        .with_body(FOREIGN_MSFT)
        .expect(1)
        .create_async()
        .await;
    let domestic_foreign_path = domestic
        .mock("GET", Matcher::Regex(r"^/(stock|etf)/.*".to_string()))
        .expect(0)
        .create_async()
        .await;
    let foreign_domestic_path = foreign
        .mock("GET", Matcher::Regex(r"^/api/stock/.*".to_string()))
        .expect(0)
        .create_async()
        .await;

    let api = NaverStockApi::new(&split_config(
        &domestic,
        &foreign,
        AutocompleteSource::Legacy,
    ))
    .unwrap();

    api.fetch_snapshot(&domestic_metadata()).await.unwrap();
    api.fetch_snapshot(&foreign_metadata(
        "https://m.stock.naver.com/worldstock/stock/MSFT.O/total",
        "MSFT.O",
    ))
    .await
    .unwrap();

    domestic_basic.assert_async().await;
    domestic_integration.assert_async().await;
    foreign_basic.assert_async().await;
    foreign_domestic_path.assert_async().await;
    domestic_foreign_path.assert_async().await;
}

// ==================== 국내 스냅샷 ====================

#[tokio::test]
async fn test_domestic_snapshot_end_to_end() {
    let mut server = Server::new_async().await;
    let _ac = server
        .mock("GET", LEGACY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(LEGACY_NAVER)
        .create_async()
        .await;
    let (basic, integration) = mock_domestic(&mut server).await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    let (metadata, snapshot) = api.lookup("naver").await.unwrap();

    basic.assert_async().await;
    integration.assert_async().await;

    assert_eq!(metadata.symbol_code(), "035420");
    assert_eq!(snapshot.name(), "NAVER");
    assert_eq!(snapshot.name_eng(), Some("NAVER"));
    assert_eq!(snapshot.symbol_code(), "035420");
    assert_eq!(snapshot.close_price(), "211,000");
    assert_eq!(snapshot.compare_price(), "-18,000");
    assert_eq!(snapshot.compare_ratio(), "-7.86%");
    assert_eq!(snapshot.market_value(), Some("34조 6,144억"));
    assert_eq!(snapshot.stock_exchange_name(), "KOSPI");
    assert_eq!(snapshot.market_status(), Some("CLOSE"));
    assert!(snapshot.over_market().is_none());

    // 상세 URL은 index.nhn으로 교정됨
    assert_eq!(
        snapshot.url(),
        format!("{}/item/index.nhn?code=035420", server.url())
    );
}

#[tokio::test]
async fn test_domestic_total_infos_panel() {
    let mut server = Server::new_async().await;
    let _mocks = mock_domestic(&mut server).await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    let snapshot = api.fetch_snapshot(&domestic_metadata()).await.unwrap();

    let expected = [
        ("전일", "229,000"),
        ("시가", "221,500"),
        ("고가", "222,000"),
        ("저가", "210,500"),
        ("거래량", "2,059,768"),
        ("대금", "442,787백만"),
        ("시총", "34조 6,144억"),
        ("외인소진율", "47.00%"),
        ("52주 최고", "246,500"),
        ("52주 최저", "155,000"),
        ("PER", "47.51배"),
        ("EPS", "4,441원"),
        ("추정PER", "35.14배"),
        ("추정EPS", "6,004원"),
        ("PBR", "1.41배"),
        ("BPS", "149,954원"),
        ("배당수익률", "0.43%"),
        ("주당배당금", "914원"),
    ];

    let infos = snapshot.total_infos();
    assert_eq!(infos.len(), expected.len());
    for (key, value) in expected {
        assert_eq!(infos.get(key), Some(value), "info panel key {key}");
    }
    // 업스트림 순서 유지
    let keys: Vec<_> = infos.keys().collect();
    assert_eq!(keys.first(), Some(&"전일"));
    assert_eq!(keys.last(), Some(&"주당배당금"));

    assert_eq!(
        snapshot.url(),
        "https://finance.naver.com/item/index.nhn?code=035420"
    );
}

#[tokio::test]
async fn test_missing_chart_key_is_empty_slot() {
    let mut server = Server::new_async().await;
    let _mocks = mock_domestic(&mut server).await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    let snapshot = api.fetch_snapshot(&domestic_metadata()).await.unwrap();

    let charts = snapshot.chart_urls();
    assert!(charts.candle_day.ends_with("035420_end.png"));
    assert!(charts.day_up.ends_with("035420_end_up.png"));
    assert_eq!(charts.transparent, "");
}

#[tokio::test]
async fn test_missing_close_price_is_schema_error() {
    let mut server = Server::new_async().await;
    let _basic = server
        .mock("GET", "/api/stock/035420/basic")
        .with_status(200)
        .with_body(r#"{"stockName": "NAVER", "itemCode": "035420"}"#)
        .create_async()
        .await;
    let _integration = server
        .mock("GET", "/api/stock/035420/integration")
        .with_status(200)
        .with_body(DOMESTIC_INTEGRATION)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    let err = api.fetch_snapshot(&domestic_metadata()).await.unwrap_err();

    match err {
        JugaError::UpstreamSchema { endpoint, detail } => {
            assert_eq!(endpoint, "domestic.basic");
            assert!(detail.contains("closePrice"), "detail: {detail}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let mut server = Server::new_async().await;
    let _basic = server
        .mock("GET", "/api/stock/035420/basic")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let _integration = server
        .mock("GET", "/api/stock/035420/integration")
        .with_status(200)
        .with_body(DOMESTIC_INTEGRATION)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::Legacy)).unwrap();
    let err = api.fetch_snapshot(&domestic_metadata()).await.unwrap_err();

    match err {
        JugaError::Upstream { endpoint, reason } => {
            assert_eq!(endpoint, "domestic.basic");
            assert!(reason.contains("500"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ==================== 해외 스냅샷 ====================

#[tokio::test]
async fn test_foreign_stock_snapshot() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/stock/MSFT.O/basic")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(FOREIGN_MSFT)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::FrontApi)).unwrap();
    let snapshot = api
        .fetch_snapshot(&foreign_metadata(
            "https://m.stock.naver.com/worldstock/stock/MSFT.O/total",
            "MSFT.O",
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(snapshot.name(), "마이크로소프트");
    assert_eq!(snapshot.name_eng(), Some("Microsoft Corp"));
    assert_eq!(snapshot.symbol_code(), "MSFT");
    assert_eq!(snapshot.close_price(), "322.98");
    assert_eq!(snapshot.compare_price(), "▲3.01");
    assert_eq!(snapshot.compare_ratio(), "▲0.94%");
    assert_eq!(snapshot.market_value(), Some("2조 3,997억 USD"));
    assert_eq!(snapshot.stock_exchange_name(), "NASDAQ");
    assert_eq!(snapshot.total_infos().get("전일"), Some("319.97"));
    assert_eq!(snapshot.chart_urls().candle_week, "");

    let over = snapshot.over_market().unwrap();
    assert_eq!(over.price, "323.50");
    assert_eq!(over.compare_price, "▲0.52");
    assert_eq!(over.compare_ratio, "▲0.16%");
}

#[tokio::test]
async fn test_foreign_etf_without_market_value() {
    let mut server = Server::new_async().await;
    let etf = server
        .mock("GET", "/etf/QQQ.O/basic")
        .with_status(200)
        .with_body(FOREIGN_QQQ)
        .expect(1)
        .create_async()
        .await;
    let stock = server
        .mock("GET", "/stock/QQQ.O/basic")
        .expect(0)
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::FrontApi)).unwrap();
    let snapshot = api
        .fetch_snapshot(&foreign_metadata(
            "https://m.stock.naver.com/worldstock/etf/QQQ.O/total",
            "QQQ.O",
        ))
        .await
        .unwrap();

    etf.assert_async().await;
    stock.assert_async().await;
    assert_eq!(snapshot.market_value(), None);
    assert_eq!(snapshot.compare_price(), "-1.25");
    assert_eq!(snapshot.compare_ratio(), "-0.34%");
    assert_eq!(snapshot.total_infos().get("NAV"), Some("370.91"));
}

#[tokio::test]
async fn test_foreign_missing_close_price_is_schema_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/stock/MSFT.O/basic")
        .with_status(200)
        .with_body(
            r#"{
                "stockName": "마이크로소프트",
                "symbolCode": "MSFT",
                "compareToPreviousClosePrice": "3.01",
                "fluctuationsRatio": "0.94",
                "stockExchangeName": "NASDAQ"
            }"#,
        )
        .create_async()
        .await;

    let api = NaverStockApi::new(&config_for(&server, AutocompleteSource::FrontApi)).unwrap();
    let err = api
        .fetch_snapshot(&foreign_metadata(
            "https://m.stock.naver.com/worldstock/stock/MSFT.O/total",
            "MSFT.O",
        ))
        .await
        .unwrap_err();

    match err {
        JugaError::UpstreamSchema { endpoint, detail } => {
            assert_eq!(endpoint, "foreign.basic");
            assert!(detail.contains("closePrice"), "detail: {detail}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
