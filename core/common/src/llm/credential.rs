//! APIキーの検証
//!
//! プレースホルダが残ったまま実行される事故を、ネットワーク到達前に止める。

use crate::error::Error;
use std::env;

/// 配布物に残りがちなプレースホルダ値
pub const PLACEHOLDER_API_KEY: &str = "PASTE_YOUR_API_KEY_HERE";

/// APIキーを検証する
///
/// 空文字列、またはプレースホルダを含む値はConfigエラー。
/// ここで失敗した場合、呼び出し側はネットワークに一切触れない。
pub fn validate_api_key(key: &str, env_name: &str) -> Result<(), Error> {
    if key.trim().is_empty() {
        return Err(Error::config(format!(
            "{} is empty. Export your Google AI API key (e.g. export {}=...) and run again.",
            env_name, env_name
        )));
    }
    if key.contains(PLACEHOLDER_API_KEY) {
        return Err(Error::config(format!(
            "{} still contains the placeholder '{}'. Replace it with your actual API key.",
            env_name, PLACEHOLDER_API_KEY
        )));
    }
    Ok(())
}

/// 環境変数からAPIキーを読み取り、検証して返す
pub fn api_key_from_env(env_name: &str) -> Result<String, Error> {
    let key = env::var(env_name).map_err(|_| {
        Error::config(format!(
            "{} environment variable is not set. Get an API key from Google AI Studio and export it before running.",
            env_name
        ))
    })?;
    validate_api_key(&key, env_name)?;
    Ok(key)
}
