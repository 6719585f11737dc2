//! plcgen共通ライブラリ
//!
//! `plcgen`コマンドから使う機能（エラー・ログ・LLMドライバー）を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// 構造化ログ（JSONL）
pub mod log;

/// LLMドライバーとプロバイダ
pub mod llm;
