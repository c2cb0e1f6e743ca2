//! 정규화된 시세 스냅샷.
//!
//! 스크래퍼는 업스트림 값을 그대로 담은 `RawSnapshot`을 만들고,
//! `StockSnapshot::from_raw`가 방향 기호, `%` 접미사, URL 교정을
//! 정확히 한 번 적용합니다. 이미 만들어진 스냅샷(역직렬화 포함)에는
//! 다시 적용되지 않습니다.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::normalize::{decorate_change, decorate_ratio, normalize_detail_url};

/// 차트 이미지 URL 묶음.
///
/// 표시 전용 정보이므로 업스트림에 없는 항목은 빈 문자열입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartUrls {
    /// 일봉
    pub candle_day: String,
    /// 주봉
    pub candle_week: String,
    /// 월봉
    pub candle_month: String,
    /// 1일
    pub day: String,
    pub day_up: String,
    pub day_up_tablet: String,
    /// 3개월
    pub area_month_three: String,
    /// 1년
    pub area_year: String,
    /// 3년
    pub area_year_three: String,
    /// 10년
    pub area_year_ten: String,
    pub transparent: String,
}

/// 종합 정보 패널 (라벨 → 값).
///
/// 업스트림 순서를 유지합니다. 같은 라벨이 다시 나오면 처음 위치를
/// 유지한 채 값만 갱신합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalInfos {
    entries: Vec<(String, Option<String>)>,
}

impl TotalInfos {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목 추가. 라벨과 값의 앞뒤 공백은 제거됩니다.
    pub fn insert(&mut self, key: &str, value: Option<&str>) {
        let key = key.trim();
        let value = value.map(|v| v.trim().to_string());

        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// 라벨로 값 조회.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TotalInfos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TotalInfos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TotalInfosVisitor;

        impl<'de> Visitor<'de> for TotalInfosVisitor {
            type Value = TotalInfos;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of label to optional string")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut infos = TotalInfos::new();
                while let Some((key, value)) = access.next_entry::<String, Option<String>>()? {
                    infos.insert(&key, value.as_deref());
                }
                Ok(infos)
            }
        }

        deserializer.deserialize_map(TotalInfosVisitor)
    }
}

/// 시간외 시세 원본 값.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOverMarketQuote {
    /// 세션 유형 (예: PRE_MARKET, AFTER_MARKET)
    pub session_type: String,
    /// 세션 상태 (예: OPEN, CLOSE)
    pub status: String,
    pub price: String,
    pub compare_price: String,
    pub compare_ratio: String,
    pub traded_at: Option<String>,
}

/// 시간외 시세 (해외 종목).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverMarketQuote {
    pub session_type: String,
    pub status: String,
    pub price: String,
    pub compare_price: String,
    pub compare_ratio: String,
    pub traded_at: Option<String>,
}

impl OverMarketQuote {
    fn from_raw(raw: RawOverMarketQuote) -> Self {
        Self {
            session_type: raw.session_type,
            status: raw.status,
            price: raw.price,
            compare_price: decorate_change(&raw.compare_price),
            compare_ratio: decorate_ratio(&raw.compare_ratio),
            traded_at: raw.traded_at,
        }
    }
}

/// 스크래퍼가 만든 정규화 이전 스냅샷.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSnapshot {
    pub name: String,
    pub name_eng: Option<String>,
    pub symbol_code: String,
    pub close_price: String,
    pub market_value: Option<String>,
    pub stock_exchange_name: String,
    /// 전일 대비 (부호 포함 원본 값)
    pub compare_price: String,
    /// 등락률 (부호 포함, `%` 없음)
    pub compare_ratio: String,
    pub total_infos: TotalInfos,
    pub chart_urls: ChartUrls,
    /// 종목 상세 페이지 URL (교정 전)
    pub url: String,
    pub market_status: Option<String>,
    pub traded_at: Option<String>,
    pub over_market: Option<RawOverMarketQuote>,
}

/// 정규화된 시세 스냅샷.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    name: String,
    name_eng: Option<String>,
    symbol_code: String,
    close_price: String,
    market_value: Option<String>,
    stock_exchange_name: String,
    compare_price: String,
    compare_ratio: String,
    total_infos: TotalInfos,
    chart_urls: ChartUrls,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    market_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    traded_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    over_market: Option<OverMarketQuote>,
}

impl StockSnapshot {
    /// 원본 스냅샷을 정규화합니다.
    pub fn from_raw(raw: RawSnapshot) -> Self {
        Self {
            name: raw.name,
            name_eng: raw.name_eng,
            symbol_code: raw.symbol_code,
            close_price: raw.close_price,
            market_value: raw.market_value,
            stock_exchange_name: raw.stock_exchange_name,
            compare_price: decorate_change(&raw.compare_price),
            compare_ratio: decorate_ratio(&raw.compare_ratio),
            total_infos: raw.total_infos,
            chart_urls: raw.chart_urls,
            url: normalize_detail_url(&raw.url),
            market_status: raw.market_status,
            traded_at: raw.traded_at,
            over_market: raw.over_market.map(OverMarketQuote::from_raw),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_eng(&self) -> Option<&str> {
        self.name_eng.as_deref()
    }

    pub fn symbol_code(&self) -> &str {
        &self.symbol_code
    }

    pub fn close_price(&self) -> &str {
        &self.close_price
    }

    /// 시가총액. 업스트림에 해당 항목이 없으면 `None` 또는 빈 문자열.
    pub fn market_value(&self) -> Option<&str> {
        self.market_value.as_deref()
    }

    pub fn stock_exchange_name(&self) -> &str {
        &self.stock_exchange_name
    }

    pub fn compare_price(&self) -> &str {
        &self.compare_price
    }

    pub fn compare_ratio(&self) -> &str {
        &self.compare_ratio
    }

    pub fn total_infos(&self) -> &TotalInfos {
        &self.total_infos
    }

    pub fn chart_urls(&self) -> &ChartUrls {
        &self.chart_urls
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn market_status(&self) -> Option<&str> {
        self.market_status.as_deref()
    }

    pub fn traded_at(&self) -> Option<&str> {
        self.traded_at.as_deref()
    }

    pub fn over_market(&self) -> Option<&OverMarketQuote> {
        self.over_market.as_ref()
    }
}
