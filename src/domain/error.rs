/// ドメイン層のエラー定義
///
/// 利用者の入力や選択に関する制約違反を表現する。
/// 外部クレートのエラーは含まない。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// ファイルが空
    #[error("file is empty: {path}")]
    EmptyFile { path: String },

    /// ファイルサイズが制限を超過
    #[error("file too large: {size} bytes (maximum allowed: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    /// 字幕ファイルの形式が無効
    #[error("invalid caption format: {path} (expected: {expected}, found: {found})")]
    InvalidFormat {
        path: String,
        expected: String,
        found: String,
    },

    /// 字幕ファイルがUTF-8テキストではない
    #[error("caption file is not valid UTF-8 text: {path}")]
    NotText { path: String },

    /// 言語コードが無効
    #[error("invalid language code: '{code}'")]
    InvalidLanguageCode { code: String },

    /// 指定した種別のアセットがメディアに存在しない
    #[error("media {media_id} has no '{asset_type}' asset (available: {available})")]
    AssetNotFound {
        media_id: String,
        asset_type: String,
        available: String,
    },

    /// 出力先が既に存在する
    #[error("output file already exists: {path}")]
    OutputExists { path: String },

    /// 一覧対象のプロジェクトが指定されていない
    #[error("no project id given and no default_project_id configured")]
    MissingProject,
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn invalid_format(
        path: impl Into<String>,
        supported_formats: &[String],
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            expected: format!("one of: {}", supported_formats.join(", ")),
            found: found.into(),
        }
    }

    pub fn asset_not_found(
        media_id: impl Into<String>,
        asset_type: impl Into<String>,
        available: &[&str],
    ) -> Self {
        Self::AssetNotFound {
            media_id: media_id.into(),
            asset_type: asset_type.into(),
            available: if available.is_empty() {
                "none".to_string()
            } else {
                available.join(", ")
            },
        }
    }

    /// エラーの深刻度を返す
    ///
    /// ドメインエラーはすべて利用者が直せる入力の問題
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::EmptyFile { .. } => Some("The caption file appears to be empty."),
            Self::FileTooLarge { .. } => Some("Split the captions or remove unused cues."),
            Self::InvalidFormat { .. } => Some("Supported caption formats: srt, vtt"),
            Self::NotText { .. } => Some("Save the caption file with UTF-8 encoding."),
            Self::InvalidLanguageCode { .. } => {
                Some("Use an ISO 639 code such as 'eng', 'fr' or 'pt-BR'.")
            }
            Self::AssetNotFound { .. } => {
                Some("Pick one of the available asset types with --asset <type>.")
            }
            Self::OutputExists { .. } => {
                Some("Choose another output path or remove the existing file.")
            }
            Self::MissingProject => Some(
                "Pass a project hashed id, or set default_project_id in your config.toml.",
            ),
        }
    }
}
