//! Geminiプロバイダの実装

use crate::error::Error;
use crate::llm::credential::api_key_from_env;
use crate::llm::provider::{Completion, GenerationConfig, LlmProvider};
use serde_json::{json, Value};

/// 既定のモデル名
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// APIキーを読む既定の環境変数名
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Geminiプロバイダ
#[derive(Debug)]
pub struct GeminiProvider {
    model: String,
    api_key: String,
    generation: GenerationConfig,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-1.5-flash"）
    /// * `api_key_env` - APIキーを読む環境変数名（デフォルト: GEMINI_API_KEY）
    /// * `generation` - 生成パラメータ
    ///
    /// # Returns
    /// * `Ok(Self)` - プロバイダ
    /// * `Err(Error)` - APIキー未設定・プレースホルダのままの場合（Config）
    pub fn new(
        model: Option<String>,
        api_key_env: Option<String>,
        generation: GenerationConfig,
    ) -> Result<Self, Error> {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let env_name = api_key_env.unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = api_key_from_env(&env_name)?;

        Ok(Self {
            model,
            api_key,
            generation,
        })
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        Ok(json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": self.generation.temperature
            }
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::request(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // エラーレスポンスを解析してメッセージを抽出
            let error_msg = if let Ok(v) = serde_json::from_str::<Value>(&response_text) {
                v["error"]["message"]
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text))
            } else {
                format!("HTTP {}: {}", status, response_text)
            };
            return Err(Error::request(format!("Gemini API error: {}", error_msg)));
        }

        Ok(response_text)
    }

    fn parse_completion(&self, response_json: &str) -> Result<Option<Completion>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::request(format!("Failed to parse response JSON: {}", e)))?;

        // ボディにerrorが埋まっているケース
        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::request(format!("Gemini API error: {}", error_msg)));
        }

        // テキストを抽出
        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
            .map(|s| s.to_string());

        // usageMetadataはレスポンスに含まれない場合がある（その場合は0）
        let total_tokens = v["usageMetadata"]["totalTokenCount"].as_u64().unwrap_or(0);

        Ok(text.map(|text| Completion { text, total_tokens }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        // APIキー検証を通さずにペイロード生成・パースをテストする
        GeminiProvider {
            model: DEFAULT_MODEL.to_string(),
            api_key: "test-key".to_string(),
            generation: GenerationConfig::default(),
        }
    }

    #[test]
    fn test_gemini_provider_name() {
        assert_eq!(provider().name(), "gemini");
    }

    #[test]
    fn test_make_request_payload_contents() {
        let payload = provider().make_request_payload("Hello").unwrap();
        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"].as_str().unwrap(), "user");
        assert_eq!(
            contents[0]["parts"][0]["text"].as_str().unwrap(),
            "Hello"
        );
    }

    #[test]
    fn test_make_request_payload_temperature() {
        let payload = provider().make_request_payload("Hello").unwrap();
        let t = payload["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((t - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_make_request_payload_custom_temperature() {
        let p = GeminiProvider {
            model: DEFAULT_MODEL.to_string(),
            api_key: "test-key".to_string(),
            generation: GenerationConfig::new(Some(0.8)),
        };
        let payload = p.make_request_payload("Hello").unwrap();
        let t = payload["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((t - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_parse_completion_with_usage() {
        let response = r#"{
            "candidates": [{"content": {"parts": [{"text": "PROGRAM OK"}]}}],
            "usageMetadata": {"promptTokenCount": 23, "candidatesTokenCount": 100, "totalTokenCount": 123}
        }"#;
        let completion = provider().parse_completion(response).unwrap().unwrap();
        assert_eq!(completion.text, "PROGRAM OK");
        assert_eq!(completion.total_tokens, 123);
    }

    #[test]
    fn test_parse_completion_without_usage() {
        let response = r#"{"candidates":[{"content":{"parts":[{"text":"hi"}]}}]}"#;
        let completion = provider().parse_completion(response).unwrap().unwrap();
        assert_eq!(completion.text, "hi");
        assert_eq!(completion.total_tokens, 0);
    }

    #[test]
    fn test_parse_completion_no_candidates() {
        let response = r#"{"candidates":[]}"#;
        assert!(provider().parse_completion(response).unwrap().is_none());
    }

    #[test]
    fn test_parse_completion_error_body() {
        let response = r#"{"error":{"code":429,"message":"Quota exceeded"}}"#;
        let err = provider().parse_completion(response).unwrap_err();
        assert!(matches!(err, Error::Request(_)));
        assert!(err.to_string().contains("Quota exceeded"));
    }

    #[test]
    fn test_parse_completion_invalid_json() {
        let err = provider().parse_completion("not json").unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }

    #[test]
    fn test_new_with_unset_env_is_config_error() {
        // このテスト専用の変数名なので未設定であることに依存してよい
        let err = GeminiProvider::new(
            None,
            Some("PLCGEN_TEST_GEMINI_UNSET".to_string()),
            GenerationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_new_with_placeholder_env_is_config_error() {
        std::env::set_var(
            "PLCGEN_TEST_GEMINI_PLACEHOLDER",
            "PASTE_YOUR_API_KEY_HERE",
        );
        let err = GeminiProvider::new(
            None,
            Some("PLCGEN_TEST_GEMINI_PLACEHOLDER".to_string()),
            GenerationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_new_with_valid_env() {
        std::env::set_var("PLCGEN_TEST_GEMINI_VALID", "valid-token");
        let p = GeminiProvider::new(
            Some("gemini-1.5-pro".to_string()),
            Some("PLCGEN_TEST_GEMINI_VALID".to_string()),
            GenerationConfig::default(),
        )
        .unwrap();
        assert_eq!(p.name(), "gemini");
        assert_eq!(p.model, "gemini-1.5-pro");
    }
}
