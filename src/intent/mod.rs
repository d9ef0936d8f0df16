/// 자연어 입력 → 구조화된 요청 속성 추출
/// 원격 텍스트 완성 서비스를 먼저 시도하고, 어떤 실패든 결정적 폴백 추출기로 대체한다.
// region:    --- Imports
use crate::catalog::ProductCategory;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

// endregion: --- Imports

pub mod fallback;
pub mod marketplace;
pub mod remote;

pub use fallback::FallbackIntentExtractor;
pub use remote::RemoteIntentExtractor;

// region:    --- Intent Model
/// 요청 문장에서 추출한 속성
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIntent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_by: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_suggestions: Option<String>,
    /// 쉼표로 구분된 검색어
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_terms: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// 검색어에서 추출한 속성
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_terms: Option<String>,
    /// 포인트 단위 (1 USD = 100 포인트)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
}

impl SearchAnalysis {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.brand.is_none() && self.search_terms.is_none()
    }

    /// 쉼표 구분 검색어 목록 (소문자)
    pub fn terms(&self) -> Vec<String> {
        split_terms(self.search_terms.as_deref())
    }
}

pub(crate) fn split_terms(raw: Option<&str>) -> Vec<String> {
    raw.map(|terms| {
        terms
            .split(',')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect()
    })
    .unwrap_or_default()
}
// endregion: --- Intent Model

// region:    --- Intent Error
/// 외부 서비스 오류
/// 추출기 밖으로는 전파되지 않고 항상 폴백으로 처리된다.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("API 키가 설정되지 않았습니다")]
    MissingApiKey,
    #[error("외부 서비스 호출 실패: {0}")]
    Http(#[from] reqwest::Error),
    #[error("외부 서비스 응답 코드 {status}: {body}")]
    Status { status: u16, body: String },
    #[error("응답 형식 오류: {0}")]
    Envelope(String),
    #[error("응답 내용이 JSON이 아닙니다: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("시간 초과 ({0:?})")]
    Timeout(Duration),
}
// endregion: --- Intent Error

// region:    --- Intent Extractor
/// 의도 추출기
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    /// 요청 의도 추출
    async fn extract_request(&self, text: &str) -> Result<RequestIntent, IntentError>;

    /// 검색 의도 추출
    async fn analyze_search(&self, query: &str) -> Result<SearchAnalysis, IntentError>;
}

/// 폴백 보장 추출기
/// 원격 추출기의 오류, 시간 초과, 잘못된 응답은 모두 결정적 추출기로 대체된다.
#[derive(Clone)]
pub struct ResilientExtractor {
    primary: Arc<dyn IntentExtractor>,
    fallback: FallbackIntentExtractor,
    timeout: Duration,
}

impl ResilientExtractor {
    pub fn new(primary: Arc<dyn IntentExtractor>, timeout: Duration) -> Self {
        Self {
            primary,
            fallback: FallbackIntentExtractor,
            timeout,
        }
    }

    /// 요청 의도 추출 (실패하지 않음)
    pub async fn extract_request(&self, text: &str) -> RequestIntent {
        info!("{:<12} --> 요청 의도 분석: {}", "Intent", text);
        match tokio::time::timeout(self.timeout, self.primary.extract_request(text)).await {
            Ok(Ok(intent)) => intent,
            Ok(Err(e)) => {
                warn!("{:<12} --> 원격 분석 실패, 폴백 사용: {}", "Intent", e);
                self.fallback.request_intent(text)
            }
            Err(_) => {
                warn!(
                    "{:<12} --> 원격 분석 실패, 폴백 사용: {}",
                    "Intent",
                    IntentError::Timeout(self.timeout)
                );
                self.fallback.request_intent(text)
            }
        }
    }

    /// 검색 의도 추출 (실패하지 않음)
    pub async fn analyze_search(&self, query: &str) -> SearchAnalysis {
        info!("{:<12} --> 검색 의도 분석: {}", "Intent", query);
        match tokio::time::timeout(self.timeout, self.primary.analyze_search(query)).await {
            Ok(Ok(analysis)) => analysis,
            Ok(Err(e)) => {
                warn!("{:<12} --> 원격 분석 실패, 폴백 사용: {}", "Intent", e);
                self.fallback.search_analysis(query)
            }
            Err(_) => {
                warn!(
                    "{:<12} --> 원격 분석 실패, 폴백 사용: {}",
                    "Intent",
                    IntentError::Timeout(self.timeout)
                );
                self.fallback.search_analysis(query)
            }
        }
    }
}
// endregion: --- Intent Extractor
