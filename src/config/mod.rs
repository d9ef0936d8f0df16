// region:    --- Imports
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// endregion: --- Imports

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_LLM_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_BIDDING_WINDOW_MINUTES: i64 = 45;
/// 입찰 기간 상한 (30일)
pub const MAX_BIDDING_WINDOW_MINUTES: i64 = 30 * 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("환경 변수 {name} 값이 올바르지 않습니다: {value}")]
    InvalidValue { name: &'static str, value: String },
}

// region:    --- App Config
/// 서비스 설정
/// .env 파일이 없어도 기본값으로 동작한다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub llm: LlmConfig,
    pub bidding_window: chrono::Duration,
    pub seed_demo_data: bool,
}

/// 외부 텍스트 완성 서비스 설정
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub model: String,
    /// 없으면 원격 추출기는 항상 실패하고 폴백으로 처리된다.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LLM_API_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_millis(DEFAULT_LLM_TIMEOUT_MS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            llm: LlmConfig::default(),
            bidding_window: chrono::Duration::minutes(DEFAULT_BIDDING_WINDOW_MINUTES),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let timeout_ms = parse_var("LLM_TIMEOUT_MS", DEFAULT_LLM_TIMEOUT_MS)?;
        let bidding_window = bidding_window_from_minutes(parse_var(
            "BIDDING_WINDOW_MINUTES",
            DEFAULT_BIDDING_WINDOW_MINUTES,
        )?)?;

        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            llm: LlmConfig {
                api_url: env::var("LLM_API_URL").unwrap_or(defaults.llm.api_url),
                model: env::var("LLM_MODEL").unwrap_or(defaults.llm.model),
                api_key: env::var("GROQ_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                timeout: Duration::from_millis(timeout_ms),
            },
            bidding_window,
            seed_demo_data: parse_var("SEED_DEMO_DATA", defaults.seed_demo_data)?,
        })
    }
}

/// 입찰 기간 검증 (1분 이상, 30일 이하)
pub fn bidding_window_from_minutes(minutes: i64) -> Result<chrono::Duration, ConfigError> {
    if (1..=MAX_BIDDING_WINDOW_MINUTES).contains(&minutes) {
        Ok(chrono::Duration::minutes(minutes))
    } else {
        Err(ConfigError::InvalidValue {
            name: "BIDDING_WINDOW_MINUTES",
            value: minutes.to_string(),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
// endregion: --- App Config

// endregion: --- Tests
