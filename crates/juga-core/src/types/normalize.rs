//! 스냅샷 표시용 정규화 함수.
//!
//! 모두 업스트림 원본 값에서 한 번만 적용되는 순수 함수입니다.

/// 상승/보합 표시 기호.
pub const RISING_GLYPH: char = '▲';

/// 깨진 국내 종목 상세 페이지 경로.
const BROKEN_DETAIL_PATH: &str = "main.nhn";
/// 교정된 국내 종목 상세 페이지 경로.
const FIXED_DETAIL_PATH: &str = "index.nhn";

/// 전일 대비 변동 값에 방향 기호를 붙입니다.
///
/// - 음수: 부호를 그대로 유지
/// - 0 이상: 앞에 `▲` 하나 (중복된 `+`는 제거)
/// - 빈 값: `0`으로 취급
///
/// "-18,000" -> "-18,000"
/// "3.01" -> "▲3.01"
pub fn decorate_change(raw: &str) -> String {
    let value = raw.trim();

    if value.starts_with('-') {
        return value.to_string();
    }

    let magnitude = value.trim_start_matches('+');
    if magnitude.is_empty() {
        format!("{}0", RISING_GLYPH)
    } else {
        format!("{}{}", RISING_GLYPH, magnitude)
    }
}

/// 등락률에 방향 기호와 `%` 접미사를 붙입니다.
///
/// 업스트림 값에 이미 `%`가 있어도 결과는 항상 `%` 하나로 끝납니다.
///
/// "-7.86" -> "-7.86%"
/// "0.94" -> "▲0.94%"
pub fn decorate_ratio(raw: &str) -> String {
    let value = raw.trim().trim_end_matches('%').trim_end();
    format!("{}%", decorate_change(value))
}

/// 상세 페이지 URL의 `main.nhn` 경로를 `index.nhn`으로 교정합니다.
pub fn normalize_detail_url(url: &str) -> String {
    url.replace(BROKEN_DETAIL_PATH, FIXED_DETAIL_PATH)
}
