//! プレゼンテーション層が使用するエラー深刻度
//!
//! 終了コードの決定に使用される。
//! 内側の層（api, domain, config）はこのモジュールに依存してよいが、
//! このモジュールは他のモジュールに依存しない。

use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// ユーザーの入力エラー（存在しないメディアID、不正な言語コードなど）
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定エラー（トークン未設定・無効、設定ファイル破損など）
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// システムエラー（ネットワーク障害、サーバーエラー、書き込み失敗など）
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorSeverity::UserError.exit_code(), 1);
        assert_eq!(ErrorSeverity::ConfigError.exit_code(), 2);
        assert_eq!(ErrorSeverity::SystemError.exit_code(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorSeverity::UserError.to_string(), "user error");
        assert_eq!(ErrorSeverity::SystemError.to_string(), "system error");
    }
}
