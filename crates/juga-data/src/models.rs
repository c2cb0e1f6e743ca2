//! 네이버 증권 API 응답 모델.
//!
//! 필수 필드는 일반 타입으로, 표시 전용 필드는 `Option`/기본값으로 선언합니다.
//! 필수 필드가 없거나 타입이 다르면 역직렬화가 실패하고
//! `UpstreamSchema` 에러로 변환됩니다.

use juga_core::{ChartUrls, RawOverMarketQuote, TotalInfos};
use serde::Deserialize;
use serde_json::Value;

/// 시가총액 항목의 필드 코드.
pub const MARKET_VALUE_CODE: &str = "marketValue";

// ==================== 자동완성 ====================

/// `ac.finance.naver.com` 자동완성 응답.
///
/// `items`는 그룹 목록이고, 각 그룹은 후보 목록이며, 각 후보는
/// `[[코드], [이름], [시장], [상대 URL], [로이터 코드], [국가 코드], [국가 이름]]`
/// 형태의 위치 기반 배열입니다.
#[derive(Debug, Deserialize)]
pub struct LegacyAutocompleteResponse {
    #[serde(default)]
    pub items: Vec<Vec<Vec<Vec<String>>>>,
}

/// `front-api` 자동완성 응답.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontAutocompleteResponse {
    pub is_success: bool,
    #[serde(default)]
    pub detail_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<FrontAutocompleteResult>,
}

#[derive(Debug, Deserialize)]
pub struct FrontAutocompleteResult {
    #[serde(default)]
    pub items: Vec<FrontAutocompleteItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontAutocompleteItem {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub type_code: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub reuters_code: Option<String>,
    #[serde(default)]
    pub nation_code: Option<String>,
    #[serde(default)]
    pub nation_name: Option<String>,
}

// ==================== 공통 ====================

/// `{code, text, name}` 형태의 코드 타입 (예: 거래정지 구분, 등락 구분).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeType {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// 차트 이미지 맵. 없는 키는 빈 문자열로 처리됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageCharts {
    pub candle_day: Option<String>,
    pub candle_week: Option<String>,
    pub candle_month: Option<String>,
    pub day: Option<String>,
    #[serde(rename = "day_up")]
    pub day_up: Option<String>,
    #[serde(rename = "day_up_tablet")]
    pub day_up_tablet: Option<String>,
    pub area_month_three: Option<String>,
    pub area_year: Option<String>,
    pub area_year_three: Option<String>,
    pub area_year_ten: Option<String>,
    pub transparent: Option<String>,
}

impl From<ImageCharts> for ChartUrls {
    fn from(charts: ImageCharts) -> Self {
        Self {
            candle_day: charts.candle_day.unwrap_or_default(),
            candle_week: charts.candle_week.unwrap_or_default(),
            candle_month: charts.candle_month.unwrap_or_default(),
            day: charts.day.unwrap_or_default(),
            day_up: charts.day_up.unwrap_or_default(),
            day_up_tablet: charts.day_up_tablet.unwrap_or_default(),
            area_month_three: charts.area_month_three.unwrap_or_default(),
            area_year: charts.area_year.unwrap_or_default(),
            area_year_three: charts.area_year_three.unwrap_or_default(),
            area_year_ten: charts.area_year_ten.unwrap_or_default(),
            transparent: charts.transparent.unwrap_or_default(),
        }
    }
}

/// 종합 정보 패널 항목 (`{code, key, value}`).
#[derive(Debug, Clone, Deserialize)]
pub struct TotalInfoItem {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl TotalInfoItem {
    /// 값을 표시용 문자열로 변환합니다 (null → `None`).
    pub fn value_text(&self) -> Option<String> {
        match &self.value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// 종합 정보 패널을 만들고 시가총액 값을 찾습니다.
///
/// 시가총액은 라벨(로케일마다 다름)이 아닌 필드 코드로 찾습니다.
/// 라벨이 없는 항목은 건너뜁니다.
pub fn collect_total_infos(items: &[TotalInfoItem]) -> (TotalInfos, Option<String>) {
    let mut infos = TotalInfos::new();
    let mut market_value = None;

    for item in items {
        let Some(key) = item.key.as_deref() else {
            continue;
        };
        let value = item.value_text();

        if item.code.as_deref() == Some(MARKET_VALUE_CODE) {
            market_value = value.clone();
        }
        infos.insert(key, value.as_deref());
    }

    (infos, market_value)
}

// ==================== 국내 ====================

/// 국내 시세 기본 정보 (`/api/stock/{code}/basic`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticBasicResponse {
    pub stock_name: String,
    pub item_code: String,
    pub close_price: String,
    pub compare_to_previous_close_price: String,
    pub fluctuations_ratio: String,
    pub stock_exchange_name: String,
    #[serde(default)]
    pub market_status: Option<String>,
    #[serde(default)]
    pub local_traded_at: Option<String>,
    #[serde(default)]
    pub trade_stop_type: Option<CodeType>,
    #[serde(default)]
    pub image_charts: Option<ImageCharts>,
}

/// 국내 종합 정보 (`/api/stock/{code}/integration`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticIntegrationResponse {
    #[serde(default)]
    pub total_infos: Option<Vec<TotalInfoItem>>,
}

// ==================== 해외 ====================

/// 해외 주식/ETF 기본 정보 (`/stock/{code}/basic`, `/etf/{code}/basic`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignBasicResponse {
    pub stock_name: String,
    #[serde(default)]
    pub stock_name_eng: Option<String>,
    pub symbol_code: String,
    pub close_price: String,
    pub compare_to_previous_close_price: String,
    pub fluctuations_ratio: String,
    pub stock_exchange_name: String,
    #[serde(default)]
    pub market_status: Option<String>,
    #[serde(default)]
    pub local_traded_at: Option<String>,
    #[serde(default)]
    pub is_etf: Option<bool>,
    #[serde(default)]
    pub over_market_price_info: Option<OverMarketPriceInfo>,
    #[serde(default)]
    pub stock_item_total_infos: Option<Vec<TotalInfoItem>>,
    #[serde(default)]
    pub image_charts: Option<ImageCharts>,
}

/// 시간외 시세 정보.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverMarketPriceInfo {
    pub trading_session_type: Option<String>,
    pub over_market_status: Option<String>,
    pub over_price: Option<String>,
    pub compare_to_previous_close_price: Option<String>,
    pub fluctuations_ratio: Option<String>,
    pub local_traded_at: Option<String>,
}

impl OverMarketPriceInfo {
    /// 가격이 있는 경우에만 시간외 시세로 변환합니다.
    pub fn into_quote(self) -> Option<RawOverMarketQuote> {
        let price = self.over_price.filter(|p| !p.trim().is_empty())?;

        Some(RawOverMarketQuote {
            session_type: self.trading_session_type.unwrap_or_default(),
            status: self.over_market_status.unwrap_or_default(),
            price,
            compare_price: self.compare_to_previous_close_price.unwrap_or_default(),
            compare_ratio: self.fluctuations_ratio.unwrap_or_default(),
            traded_at: self.local_traded_at,
        })
    }
}
