//! 종목 시세 출력.

use std::fmt::{self, Write};

use juga_core::{InstrumentMetadata, StockSnapshot};
use juga_data::NaverStockApi;
use serde_json::json;

/// 종목 하나를 조회해 출력합니다.
///
/// 검색 결과가 없으면 `JugaError::InvalidStockQuery`가 그대로 전달됩니다.
pub async fn run(api: &NaverStockApi, ticker: &str, json: bool) -> anyhow::Result<()> {
    let (metadata, snapshot) = api.lookup(ticker).await?;

    if json {
        let output = json!({
            "query": ticker,
            "metadata": metadata,
            "snapshot": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render(ticker, &metadata, &snapshot)?);
    }

    Ok(())
}

/// 사람이 읽는 형식의 출력 블록.
fn render(
    ticker: &str,
    metadata: &InstrumentMetadata,
    snapshot: &StockSnapshot,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "stock: {}", ticker)?;
    writeln!(out, "{}", metadata)?;
    writeln!(out)?;

    match snapshot.name_eng() {
        Some(eng) if eng != snapshot.name() => {
            writeln!(out, "종목명    {} ({})", snapshot.name(), eng)?
        }
        _ => writeln!(out, "종목명    {}", snapshot.name())?,
    }
    writeln!(out, "종목코드  {}", snapshot.symbol_code())?;
    writeln!(out, "거래소    {}", snapshot.stock_exchange_name())?;
    writeln!(out, "현재가    {}", snapshot.close_price())?;
    writeln!(
        out,
        "전일대비  {} ({})",
        snapshot.compare_price(),
        snapshot.compare_ratio()
    )?;
    writeln!(out, "시가총액  {}", snapshot.market_value().unwrap_or("-"))?;

    if let Some(status) = snapshot.market_status() {
        match snapshot.traded_at() {
            Some(at) => writeln!(out, "장 상태   {} ({})", status, at)?,
            None => writeln!(out, "장 상태   {}", status)?,
        }
    }

    if let Some(over) = snapshot.over_market() {
        writeln!(
            out,
            "시간외    {} {} ({}) [{}]",
            over.price, over.compare_price, over.compare_ratio, over.session_type
        )?;
    }

    if !snapshot.total_infos().is_empty() {
        writeln!(out)?;
        writeln!(out, "[종합 정보]")?;
        for (key, value) in snapshot.total_infos().iter() {
            writeln!(out, "  {}: {}", key, value.unwrap_or("-"))?;
        }
    }

    let chart = &snapshot.chart_urls().candle_day;
    if !chart.is_empty() {
        writeln!(out)?;
        writeln!(out, "차트      {}", chart)?;
    }
    writeln!(out, "상세      {}", snapshot.url())?;

    Ok(out)
}
