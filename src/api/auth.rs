/// 認証情報
///
/// Wistia Data API は静的な Bearer トークンで認証します。
/// ヘッダー値は生成時に一度だけ組み立て、以降は変更しません。
use crate::api::error::RequestError;

/// Bearer トークン認証
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
    header_value: String,
}

impl BearerAuth {
    /// 新しい認証情報を作成
    ///
    /// # Errors
    /// トークンが空、または空白のみの場合に RequestError::InvalidArgument を返します。
    pub fn new(token: impl Into<String>) -> Result<Self, RequestError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(RequestError::invalid_argument("API token cannot be empty"));
        }

        let header_value = format!("Bearer {}", token);
        Ok(Self {
            token,
            header_value,
        })
    }

    /// `Authorization` ヘッダーの値
    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    /// トークンをマスキングして表示
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }
}

// トークンをログやパニックメッセージに出さない
impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &self.masked_token())
            .finish()
    }
}
