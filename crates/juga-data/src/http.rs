//! JSON GET 요청 헬퍼.

use juga_core::{JugaError, JugaResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// 에러 메시지에 포함할 응답 본문 최대 길이.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// GET 요청 후 응답 본문을 JSON으로 파싱합니다.
///
/// - 전송 실패, 2xx 이외 상태 → `JugaError::Upstream`
/// - 본문 파싱 실패 (필수 필드 누락/타입 불일치) → `JugaError::UpstreamSchema`
///
/// Content-Type 헤더는 확인하지 않습니다 (자동완성 API는 text/javascript로 응답).
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    endpoint: &str,
    url: &str,
    query: &[(&str, &str)],
) -> JugaResult<T> {
    debug!(endpoint, url, "GET");

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| JugaError::upstream(endpoint, e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| JugaError::upstream(endpoint, e.to_string()))?;

    if !status.is_success() {
        error!("{} request failed: {} - {}", endpoint, status, body);
        let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return Err(JugaError::upstream(
            endpoint,
            format!("HTTP {}: {}", status, snippet),
        ));
    }

    serde_json::from_str(&body).map_err(|e| JugaError::schema(endpoint, e.to_string()))
}
