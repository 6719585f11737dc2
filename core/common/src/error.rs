//! エラーハンドリング
//!
//! エラーは種別ごとのvariantにメッセージ文字列を載せて運びます。
//! 終了コードはsysexits準拠（64: usage, 74: request/io, 78: config）。

/// エラー型
///
/// リモート呼び出しの失敗はサブ種別（ネットワーク・認証・クォータ・不正レスポンス）を
/// 区別せず、すべて`Request`として報告する。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（main でusage行を表示する）
    #[error("{0}")]
    Usage(String),
    /// 設定不備（APIキー未設定・プレースホルダのまま・profiles.json破損等）。
    /// ネットワーク到達前に検出する
    #[error("{0}")]
    Config(String),
    /// リモート呼び出しの失敗
    #[error("{0}")]
    Request(String),
    /// ローカルI/Oの失敗（ログ追記等）
    #[error("{0}")]
    Io(String),
}

impl Error {
    /// 引数不正エラー
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// 設定不備エラー
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// リモート呼び出し失敗エラー
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// I/Oエラー
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// usageエラーかどうか（mainでusage行を出すか判定する）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// sysexits準拠の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 64,
            Self::Config(_) => 78,
            Self::Request(_) | Self::Io(_) => 74,
        }
    }

    /// ログの`kind`フィールド用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Config(_) => "config",
            Self::Request(_) => "request",
            Self::Io(_) => "io",
        }
    }
}
