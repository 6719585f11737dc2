//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、プロンプトをそのまま決定的な応答にして
//! 返します。デバッグやテスト用に使用します。

use crate::error::Error;
use crate::llm::provider::{Completion, LlmProvider};
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for EchoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        Ok(json!({ "prompt": prompt }))
    }

    /// ネットワークに出ず、リクエストからダミーレスポンスを組み立てる
    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let v: Value = serde_json::from_str(request_json)
            .map_err(|e| Error::request(format!("Failed to parse request JSON: {}", e)))?;
        let prompt = v["prompt"].as_str().unwrap_or("");
        // トークン数は単語数で代用（決定的であることが重要）
        let response = json!({
            "echo": {
                "text": format!("[echo] {}", prompt),
                "totalTokens": prompt.split_whitespace().count()
            }
        });
        Ok(response.to_string())
    }

    fn parse_completion(&self, response_json: &str) -> Result<Option<Completion>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::request(format!("Failed to parse response JSON: {}", e)))?;
        let text = v["echo"]["text"].as_str().map(|s| s.to_string());
        let total_tokens = v["echo"]["totalTokens"].as_u64().unwrap_or(0);
        Ok(text.map(|text| Completion { text, total_tokens }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_provider_name() {
        assert_eq!(EchoProvider::new().name(), "echo");
    }

    #[test]
    fn test_echo_make_request_payload() {
        let payload = EchoProvider::new().make_request_payload("Hello").unwrap();
        assert_eq!(payload["prompt"], "Hello");
    }

    #[test]
    fn test_echo_roundtrip_is_deterministic() {
        let provider = EchoProvider::new();
        let payload = provider.make_request_payload("one two three").unwrap();
        let request_json = payload.to_string();
        let response = provider.make_http_request(&request_json).unwrap();
        let completion = provider.parse_completion(&response).unwrap().unwrap();
        assert_eq!(completion.text, "[echo] one two three");
        assert_eq!(completion.total_tokens, 3);

        // 同じ入力なら同じ出力
        let response2 = provider.make_http_request(&request_json).unwrap();
        let completion2 = provider.parse_completion(&response2).unwrap().unwrap();
        assert_eq!(completion, completion2);
    }
}
