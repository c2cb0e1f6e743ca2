//! 검색 후보 목록 출력.

use juga_core::InstrumentMetadata;
use juga_data::NaverStockApi;

/// 검색어의 후보 목록을 업스트림 순위대로 출력합니다.
pub async fn run(api: &NaverStockApi, query: &str, json: bool) -> anyhow::Result<()> {
    let matches = api.search(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else if matches.is_empty() {
        println!("검색 결과 없음: {}", query);
    } else {
        print!("{}", render_matches(&matches));
    }

    Ok(())
}

/// 후보 한 건당 한 줄.
fn render_matches(matches: &[InstrumentMetadata]) -> String {
    matches
        .iter()
        .enumerate()
        .map(|(rank, metadata)| format!("{:>2}. {}\n", rank + 1, metadata))
        .collect()
}
