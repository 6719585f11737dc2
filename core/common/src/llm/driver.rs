//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → 抽出）を提供します。

use crate::error::Error;
use crate::llm::provider::{Completion, LlmProvider};

/// LLMドライバー
pub struct LlmDriver<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> LlmDriver<P> {
    /// 新しいドライバーを作成
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// プロンプトを1回送信してCompletionを取得する
    ///
    /// リトライ・バックオフ・キャッシュは行わない。ネットワーク呼び出しは常に1回。
    ///
    /// # Arguments
    /// * `prompt` - 送信するプロンプト
    ///
    /// # Returns
    /// * `Ok(Completion)` - 生成テキストとトークン使用量
    /// * `Err(Error)` - エラー
    pub fn generate(&self, prompt: &str) -> Result<Completion, Error> {
        // リクエストペイロードを生成
        let payload = self.provider.make_request_payload(prompt)?;

        // JSON文字列に変換
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::request(format!("Failed to serialize request: {}", e)))?;

        // HTTPリクエストを実行
        let response_json = self.provider.make_http_request(&request_json)?;

        // レスポンスからCompletionを抽出
        self.provider
            .parse_completion(&response_json)?
            .ok_or_else(|| Error::request("No text in response".to_string()))
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
