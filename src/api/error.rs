/// API通信層のエラー定義
///
/// Wistia Data API とのやり取りで発生するエラーを一つの型にまとめる。
/// クライアントは再試行や分類を行わず、すべて呼び出し元へそのまま返す。
/// #[source] を使って原因連鎖を保持する。
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    /// 接続失敗などのネットワークエラー
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// タイムアウト
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// 2xx 以外のステータスが返された
    #[error("API error: {endpoint} returned {status} - {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// レスポンスボディのJSONデコード失敗
    #[error("failed to decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// ダウンロード先への書き込み失敗
    #[error("I/O error while writing download")]
    Io(#[from] io::Error),

    /// リクエストを送る前に弾かれた引数
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl RequestError {
    pub fn network(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn api(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// reqwest の送信エラーを操作名つきで分類する
    pub(crate) fn from_send(operation: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(operation)
        } else if error.is_connect() {
            Self::network(format!("Connection failed for {}", operation), error)
        } else {
            Self::network(format!("Request failed for {}", operation), error)
        }
    }

    /// HTTPステータスコード（Api エラーの場合のみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Api { status: 401 | 403, .. } => ErrorSeverity::ConfigError,
            Self::Api { status, .. } if (400..500).contains(status) => ErrorSeverity::UserError,
            Self::InvalidArgument { .. } => ErrorSeverity::UserError,
            _ => ErrorSeverity::SystemError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Api { status: 401 | 403, .. } => Some(
                "The API token was rejected. Run 'wistia login' with a token that has read/write access.",
            ),
            Self::Api { status: 404, .. } => {
                Some("Check the hashed id. The media or caption may already have been deleted.")
            }
            Self::Timeout { .. } | Self::Network { .. } => {
                Some("Check your network connection and try again.")
            }
            _ => None,
        }
    }
}
