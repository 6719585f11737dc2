//! LLMプロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// 既定の生成温度
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// 生成パラメータ
///
/// 一度構築したら不変のままリクエストに渡す。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// 低いほど出力が決定的・予測可能になる
    pub temperature: f32,
}

impl GenerationConfig {
    /// 生成パラメータを構築する（未指定はデフォルト値）
    ///
    /// 値域チェックは行わない。リモートサービス側の制約に委ねる。
    pub fn new(temperature: Option<f32>) -> Self {
        Self {
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// リモートサービスからの応答（生成テキスト + トークン使用量）
///
/// 受信後は読み取り専用。表示したら破棄され、永続化はしない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// 生成されたテキスト
    pub text: String,
    /// リクエスト + レスポンス合計のトークン数（課金・クォータの把握用）
    pub total_tokens: u64,
}

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（Gemini、Echo）はこのトレイトを実装する必要があります。
/// generate 1回 = HTTPリクエスト1回。ストリーミング・会話履歴は扱わない。
pub trait LlmProvider {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `prompt` - 送信するプロンプト
    ///
    /// # Returns
    /// * `Ok(Value)` - リクエストJSON
    /// * `Err(Error)` - エラー
    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error>;

    /// HTTPリクエストを1回実行してレスポンス本文を取得
    ///
    /// # Arguments
    /// * `request_json` - リクエストJSON文字列
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error)` - エラー
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからCompletionを抽出
    ///
    /// # Arguments
    /// * `response_json` - レスポンスJSON文字列
    ///
    /// # Returns
    /// * `Ok(Option<Completion>)` - 抽出した完了（テキストが無い場合はNone）
    /// * `Err(Error)` - エラー
    fn parse_completion(&self, response_json: &str) -> Result<Option<Completion>, Error>;
}
