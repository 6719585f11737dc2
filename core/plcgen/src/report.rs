//! 実行結果の整形
//!
//! stdout / stderrへ流す文字列をここで組み立てる（純関数にしてテスト可能にする）。

use common::error::Error;
use common::llm::provider::Completion;

/// 成功時の報告（生成テキスト + トークン使用量）
pub fn render_completion(completion: &Completion) -> String {
    format!(
        "--- Generated Structured Text ---\n{}\n---------------------------------\n\nToken usage: {} tokens",
        completion.text, completion.total_tokens
    )
}

/// 失敗時の報告（総称的な診断メッセージ + エラー詳細）
///
/// スタックトレースや生のエラーオブジェクトは出さない。Configエラーは
/// メッセージ自体が対処手順なのでそのまま示す。
pub fn render_failure(err: &Error) -> String {
    match err {
        Error::Config(msg) => format!("Configuration error: {}", msg),
        _ => format!(
            "An error occurred while requesting the completion. Check your API key and network connection.\nError details: {}",
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_completion_contains_text_and_token_count() {
        let completion = Completion {
            text: "PROGRAM OK".to_string(),
            total_tokens: 123,
        };
        let out = render_completion(&completion);
        assert!(out.contains("PROGRAM OK"));
        assert!(out.contains("123 tokens"));
    }

    #[test]
    fn test_render_completion_is_stable() {
        // 同じCompletionなら常に同じ出力（隠れた状態が無い）
        let completion = Completion {
            text: "PROGRAM Demo".to_string(),
            total_tokens: 42,
        };
        assert_eq!(render_completion(&completion), render_completion(&completion));
    }

    #[test]
    fn test_render_failure_request_error() {
        let err = Error::request("HTTP request failed: connection refused");
        let out = render_failure(&err);
        assert!(out.contains("An error occurred"));
        assert!(out.contains("Error details: HTTP request failed: connection refused"));
    }

    #[test]
    fn test_render_failure_config_error_keeps_instructions() {
        let err = Error::config(
            "GEMINI_API_KEY still contains the placeholder 'PASTE_YOUR_API_KEY_HERE'. Replace it with your actual API key.",
        );
        let out = render_failure(&err);
        assert!(out.starts_with("Configuration error:"));
        assert!(out.contains("PASTE_YOUR_API_KEY_HERE"));
        // 設定エラーに総称メッセージは混ぜない
        assert!(!out.contains("network connection"));
    }
}
