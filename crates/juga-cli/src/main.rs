//! 주가 조회 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 국내 종목 조회
//! juga stock naver
//!
//! # 해외 종목 조회 (JSON 출력)
//! juga stock microsoft --json
//!
//! # 검색 후보 목록만 보기
//! juga search 삼성
//!
//! # 설정 파일과 로그 형식 지정
//! juga --config juga.toml --log-level debug --log-format pretty stock 035420
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use juga_core::{init_logging, JugaConfig, JugaError, LogConfig, LogFormat};
use juga_data::NaverStockApi;
use tracing::debug;

mod commands;

/// 검색어에 해당하는 종목이 없을 때의 종료 코드.
const EXIT_INVALID_QUERY: u8 = 2;
const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "juga")]
#[command(about = "주가 조회 CLI - 네이버 증권 기반 국내/해외 시세 조회", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: juga.toml, 없으면 기본값 사용)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 로그 필터 (예: info, juga_data=debug). RUST_LOG가 우선합니다.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목 시세 조회
    Stock {
        /// 종목명, 종목 코드 또는 티커 (예: naver, 035420, MSFT)
        ticker: String,

        /// JSON으로 출력
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// 검색 후보 목록 조회 (시세 조회 없음)
    Search {
        /// 검색어
        query: String,

        /// JSON으로 출력
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            let (code, message) = failure_report(&err);
            eprintln!("{}", message);
            ExitCode::from(code)
        }
    }
}

/// 실패 시 종료 코드와 표준 에러에 출력할 메시지 한 줄.
fn failure_report(err: &anyhow::Error) -> (u8, String) {
    match err.downcast_ref::<JugaError>() {
        Some(juga_err) if juga_err.is_invalid_query() => {
            (EXIT_INVALID_QUERY, juga_err.to_string())
        }
        _ => (EXIT_FAILURE, format!("오류: {:#}", err)),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref())?;

    let mut log_config = LogConfig::from_settings(&config.logging);
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    if let Some(format) = cli
        .log_format
        .or_else(|| std::env::var("LOG_FORMAT").ok())
    {
        let format: LogFormat = format.parse().map_err(anyhow::Error::msg)?;
        log_config = log_config.with_format(format);
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    debug!(?config, "configuration loaded");

    let api = NaverStockApi::new(&config)?;

    match cli.command {
        Commands::Stock { ticker, json } => commands::stock::run(&api, &ticker, json).await,
        Commands::Search { query, json } => commands::search::run(&api, &query, json).await,
    }
}

/// 설정 로드. 명시한 설정 파일이 없으면 실패합니다.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<JugaConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("설정 파일을 찾을 수 없습니다: {}", path.display());
            }
            JugaConfig::load(path)
                .with_context(|| format!("설정 파일 로드 실패: {}", path.display()))
        }
        None => JugaConfig::load_default().context("기본 설정 로드 실패"),
    }
}
