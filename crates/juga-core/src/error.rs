//! 주가 조회 에러 타입.
//!
//! 조회 한 건에서 발생한 모든 실패는 해당 조회를 중단시킵니다.
//! 부분 스냅샷은 반환하지 않으며 자동 재시도도 하지 않습니다.

use thiserror::Error;

/// 주가 조회 에러.
#[derive(Debug, Error)]
pub enum JugaError {
    /// 검색어에 해당하는 종목이 없음
    #[error("종목을 찾을 수 없습니다: {0}")]
    InvalidStockQuery(String),

    /// 업스트림 요청 실패 (연결, 타임아웃, 2xx 이외 응답)
    #[error("업스트림 요청 실패 ({endpoint}): {reason}")]
    Upstream { endpoint: String, reason: String },

    /// 업스트림 응답의 필수 필드 누락 또는 타입 불일치
    #[error("업스트림 응답 형식 오류 ({endpoint}): {detail}")]
    UpstreamSchema { endpoint: String, detail: String },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 주가 조회 작업을 위한 Result 타입.
pub type JugaResult<T> = Result<T, JugaError>;

impl JugaError {
    /// 업스트림 요청 실패 에러 생성.
    pub fn upstream(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Upstream {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// 응답 형식 오류 생성.
    pub fn schema(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UpstreamSchema {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// 사용자 입력 문제로 인한 에러인지 확인합니다.
    ///
    /// CLI는 이 경우에만 별도의 종료 코드로 깔끔하게 종료합니다.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidStockQuery(_))
    }
}

impl From<config::ConfigError> for JugaError {
    fn from(err: config::ConfigError) -> Self {
        JugaError::Config(err.to_string())
    }
}
