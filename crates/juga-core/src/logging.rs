//! tracing을 사용한 로깅 인프라.
//!
//! 표준 출력은 조회 결과 전용이므로 로그는 모두 표준 에러로 기록합니다.
//! - **pretty**: 사람이 읽기 쉬운 여러 줄 형식
//! - **json**: 로그 수집용 JSON 형식
//! - **compact**: 간결한 한 줄 형식 (CLI 기본값)

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    Pretty,
    /// JSON 형식
    Json,
    /// 간결한 한 줄 형식
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "juga_data=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 설정 파일의 로깅 섹션에서 생성합니다.
    ///
    /// 알 수 없는 형식 문자열은 기본 형식으로 대체합니다.
    pub fn from_settings(settings: &crate::LoggingConfig) -> Self {
        Self {
            level: settings.level.clone(),
            format: settings.format.parse().unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`가 설정되어 있으면 `config.level`보다 우선합니다.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    match config.format {
        LogFormat::Pretty => registry.with(layer.pretty()).try_init()?,
        LogFormat::Json => registry.with(layer.json()).try_init()?,
        LogFormat::Compact => registry.with(layer.compact()).try_init()?,
    }

    tracing::debug!(
        format = ?config.format,
        filter = %config.level,
        "로깅 초기화 완료"
    );

    Ok(())
}
