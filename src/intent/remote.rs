/// 원격 텍스트 완성 서비스 추출기
/// 채팅 완성 형식의 응답에서 첫 번째 choice의 message.content를 JSON으로 해석한다.
/// 부분 파싱은 하지 않는다: 형식이 조금이라도 틀리면 실패로 처리한다.
// region:    --- Imports
use super::{IntentError, IntentExtractor, RequestIntent, SearchAnalysis};
use crate::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

// endregion: --- Imports

const REQUEST_SYSTEM_PROMPT: &str = r#"
Extract structured information from the user's product request.
Return a JSON object with these fields:
- productCategory: One of [electronics, office, furniture, it, other]
- productName: The name or type of product
- description: A detailed description based on the request
- quantity: The number of items requested (default to 1 if not specified)
- budget: The budget per unit (if mentioned)
- requiredBy: The required date in YYYY-MM-DD format (if mentioned)
- additionalSuggestions: Provide helpful suggestions based on the request (e.g., "Consider adding specifications for RAM and storage" for laptops)
- searchTerms: A comma-separated list of key terms that would help find matching products (e.g., "laptop, dell, 16gb, ssd" for a Dell laptop request)

Only include fields that can be confidently extracted from the input.
Format your response as valid JSON without any additional text.
"#;

const SEARCH_SYSTEM_PROMPT: &str = r#"
Extract structured information from the user's product search query.
Return a JSON object with these fields:
- category: One of [electronics, office, furniture, it, other] or null if not specified
- brand: The brand name mentioned in the query or null if not specified
- searchTerms: A comma-separated list of key terms that would help find matching products
- priceRange: An object with min and max fields (in points, where 1 USD = 100 points) or null if not specified

Only include fields that can be confidently extracted from the input.
Format your response as valid JSON without any additional text.
"#;

// region:    --- Wire Model
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
// endregion: --- Wire Model

// region:    --- Remote Extractor
#[derive(Debug, Clone)]
pub struct RemoteIntentExtractor {
    client: Client,
    config: LlmConfig,
}

impl RemoteIntentExtractor {
    pub fn new(config: LlmConfig) -> Result<Self, IntentError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// 채팅 완성 호출 후 content를 JSON으로 해석
    async fn complete<T: DeserializeOwned>(
        &self,
        system_prompt: &str,
        user_prompt: String,
        max_tokens: u32,
    ) -> Result<T, IntentError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(IntentError::MissingApiKey)?;

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.2,
            max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| IntentError::Envelope(e.to_string()))?;
        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| IntentError::Envelope("choices가 비어 있습니다".to_string()))?;

        debug!("{:<12} --> 원격 응답: {}", "Intent", content);
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl IntentExtractor for RemoteIntentExtractor {
    async fn extract_request(&self, text: &str) -> Result<RequestIntent, IntentError> {
        self.complete(
            REQUEST_SYSTEM_PROMPT,
            format!("Analyze this product request: \"{}\"", text),
            1000,
        )
        .await
    }

    async fn analyze_search(&self, query: &str) -> Result<SearchAnalysis, IntentError> {
        self.complete(
            SEARCH_SYSTEM_PROMPT,
            format!("Analyze this search query: \"{}\"", query),
            500,
        )
        .await
    }
}
// endregion: --- Remote Extractor
