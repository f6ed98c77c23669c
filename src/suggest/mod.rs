/// 이미지 기반 상품 정보 추천
/// 촬영하거나 업로드한 사진을 Gemini API로 보내 상품 이름, 추천가, 설명,
/// 카테고리를 제안받는다. 호출이 실패해도 오류를 올리지 않고 기본 추천값으로
/// 대체해 등록 흐름이 항상 수동 편집 단계로 이어지게 한다.
// region:    --- Imports
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Suggestion Model

/// 추천된 상품 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSuggestion {
    pub name: String,
    pub suggested_price: f64,
    pub description: String,
    pub category: String,
}

/// 추천 요청 본문 (카메라 촬영본과 파일 업로드 모두 같은 인코딩 형태로 들어온다)
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub image_base64: String,
    #[serde(default)]
    pub hint: Option<String>,
}

/// 추천 요청의 결과
/// 실패 시에도 기본값을 담아 돌려주므로 호출자는 대체된 값인지 구분할 수 있다.
#[derive(Debug, Clone)]
pub enum SuggestionOutcome {
    /// AI가 생성한 추천
    Suggested(ListingSuggestion),
    /// 호출 실패로 대체된 기본 추천
    Unavailable { fallback: ListingSuggestion },
}

impl SuggestionOutcome {
    /// 대체 여부와 무관하게 추천값 꺼내기
    pub fn into_suggestion(self) -> ListingSuggestion {
        match self {
            SuggestionOutcome::Suggested(suggestion) => suggestion,
            SuggestionOutcome::Unavailable { fallback } => fallback,
        }
    }

    /// 기본값으로 대체된 결과인지 여부
    pub fn is_fallback(&self) -> bool {
        matches!(self, SuggestionOutcome::Unavailable { .. })
    }
}

// endregion: --- Suggestion Model

// region:    --- Fallback

/// 대체 추천의 기본 상품 이름 (힌트가 없을 때)
pub const FALLBACK_NAME: &str = "미확인 상품";

/// 대체 추천의 기본 설명
pub const FALLBACK_DESCRIPTION: &str = "상태 양호한 반품 상품입니다. 사진을 참고해 주세요.";

/// 대체 추천의 기본 카테고리
pub const FALLBACK_CATEGORY: &str = "기타";

/// 추천 실패 시 사용할 기본 추천값
/// 이름은 사용자 힌트가 있으면 힌트를, 없으면 기본 이름을 쓰고 추천가는 0으로 둔다.
pub fn fallback_suggestion(hint: Option<&str>) -> ListingSuggestion {
    ListingSuggestion {
        name: hint
            .filter(|h| !h.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_NAME.to_string()),
        suggested_price: 0.0,
        description: FALLBACK_DESCRIPTION.to_string(),
        category: FALLBACK_CATEGORY.to_string(),
    }
}

// endregion: --- Fallback

// region:    --- Suggestion Service

/// 상품 정보 추천 서비스 트레이트
#[async_trait]
pub trait SuggestionService {
    async fn suggest(&self, image_base64: &str, hint: Option<&str>) -> SuggestionOutcome;
}

/// 기본 모델명 (GEMINI_MODEL 환경 변수로 재정의 가능)
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Gemini API 기본 주소
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API 클라이언트
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// 클라이언트 생성 (키가 없으면 모든 요청이 기본 추천값으로 대체된다)
    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url,
        }
    }

    /// 환경 변수로부터 클라이언트 생성
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").ok();
        if api_key.is_none() {
            warn!(
                "{:<12} --> GEMINI_API_KEY 미설정: 추천 요청은 모두 기본값으로 대체됩니다.",
                "Suggest"
            );
        }
        Self::new(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// 추천 프롬프트 생성
    fn build_prompt(hint: Option<&str>) -> String {
        let mut prompt = String::from(
            "Analyze this image of a returned item. \
             1. Identify exactly what the item is and provide a clear, concise name (max 40 chars). \
             2. Suggest a fair original resale price in EUR for a liquidation bin store \
             (be realistic for a second-hand/returned item). \
             3. Write a short, catchy 2-sentence description focusing on its features and value. \
             4. Categorize it (e.g., Electronics, Home, Kitchen, Fashion, Toys). ",
        );
        if let Some(hint) = hint {
            prompt.push_str(&format!("Note: The user says this might be \"{}\". ", hint));
        }
        prompt.push_str("Provide the result in JSON format.");
        prompt
    }

    /// Gemini 호출 및 응답 파싱
    async fn request_suggestion(
        &self,
        image_base64: &str,
        hint: Option<&str>,
    ) -> Result<ListingSuggestion, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "GEMINI_API_KEY 미설정".to_string())?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "contents": [{
                "parts": [
                    { "text": Self::build_prompt(hint) },
                    { "inline_data": {
                        "mime_type": "image/jpeg",
                        "data": strip_data_url(image_base64),
                    }},
                ],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "suggested_price": { "type": "NUMBER" },
                        "description": { "type": "STRING" },
                        "category": { "type": "STRING" },
                    },
                    "required": ["name", "suggested_price", "description", "category"],
                },
            },
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Gemini API error {}: {}", status, error_text));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| "응답에 추천 텍스트가 없습니다.".to_string())?;

        serde_json::from_str(text).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl SuggestionService for GeminiClient {
    /// 추천 요청
    /// 네트워크 오류, 비정상 응답, 파싱 실패 모두 기본 추천값으로 대체된다.
    async fn suggest(&self, image_base64: &str, hint: Option<&str>) -> SuggestionOutcome {
        info!("{:<12} --> 상품 정보 추천 요청", "Suggest");
        match self.request_suggestion(image_base64, hint).await {
            Ok(suggestion) => {
                info!(
                    "{:<12} --> 추천 수신: {} ({})",
                    "Suggest", suggestion.name, suggestion.category
                );
                SuggestionOutcome::Suggested(suggestion)
            }
            Err(e) => {
                warn!(
                    "{:<12} --> 추천 호출 실패, 기본값으로 대체: {}",
                    "Suggest", e
                );
                SuggestionOutcome::Unavailable {
                    fallback: fallback_suggestion(hint),
                }
            }
        }
    }
}

// endregion: --- Suggestion Service

// region:    --- Image Encoding

/// 데이터 URL 형식(`data:image/jpeg;base64,...`)에서 base64 본문만 추출
/// 이미 본문만 있는 입력은 그대로 돌려준다.
pub fn strip_data_url(image: &str) -> &str {
    match image.split_once(',') {
        Some((head, data)) if head.starts_with("data:") => data,
        _ => image,
    }
}

// endregion: --- Image Encoding
