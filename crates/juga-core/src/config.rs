//! 설정 관리.
//!
//! 기본값 → TOML 설정 파일(선택) → `JUGA` 접두사 환경 변수 순서로 덮어씁니다.
//!
//! ```toml
//! [http]
//! timeout_secs = 10
//!
//! [endpoints]
//! autocomplete_source = "front_api"
//!
//! [resolver]
//! cache_capacity = 20
//! ```
//!
//! 환경 변수 예시: `JUGA__HTTP__TIMEOUT_SECS=5`, `JUGA__ENDPOINTS__AUTOCOMPLETE_SOURCE=legacy`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "juga.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct JugaConfig {
    /// HTTP 클라이언트 설정
    pub http: HttpConfig,
    /// 업스트림 엔드포인트 설정
    pub endpoints: EndpointConfig,
    /// 종목 검색 설정
    pub resolver: ResolverConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// HTTP 클라이언트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl HttpConfig {
    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 자동완성 응답 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutocompleteSource {
    /// `ac.finance.naver.com` 위치 기반 배열 형식
    #[default]
    Legacy,
    /// `m.stock.naver.com/front-api` 객체 형식
    FrontApi,
}

/// 업스트림 엔드포인트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// 사용할 자동완성 응답 형식
    pub autocomplete_source: AutocompleteSource,
    /// 위치 기반 자동완성 URL
    pub legacy_autocomplete_url: String,
    /// front-api 자동완성 URL
    pub front_autocomplete_url: String,
    /// 국내 시세 API 기본 URL (`/api/stock/{code}/basic`)
    pub domestic_base_url: String,
    /// 해외 시세 API 기본 URL (`/stock/{code}/basic`, `/etf/{code}/basic`)
    pub foreign_base_url: String,
    /// 종목 상세 페이지 기본 URL (자동완성의 상대 경로가 붙음)
    pub detail_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            autocomplete_source: AutocompleteSource::Legacy,
            legacy_autocomplete_url: "https://ac.finance.naver.com/ac".to_string(),
            front_autocomplete_url: "https://m.stock.naver.com/front-api/v1/search/autoComplete"
                .to_string(),
            domestic_base_url: "https://m.stock.naver.com".to_string(),
            foreign_base_url: "https://api.stock.naver.com".to_string(),
            detail_base_url: "https://m.stock.naver.com".to_string(),
        }
    }
}

impl EndpointConfig {
    /// 현재 선택된 자동완성 URL.
    pub fn autocomplete_url(&self) -> &str {
        match self.autocomplete_source {
            AutocompleteSource::Legacy => &self.legacy_autocomplete_url,
            AutocompleteSource::FrontApi => &self.front_autocomplete_url,
        }
    }
}

/// 종목 검색 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// 검색 결과 LRU 캐시 용량
    pub cache_capacity: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { cache_capacity: 20 }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl JugaConfig {
    /// 파일과 환경 변수에서 설정 로드.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// 기본 경로(`juga.toml`)에서 설정 로드.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// 환경 변수 소스를 직접 지정하여 설정 로드.
    ///
    /// `env`가 `None`이면 프로세스 환경 변수를 사용합니다.
    pub fn load_with_env<P: AsRef<Path>>(
        path: P,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("JUGA")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
