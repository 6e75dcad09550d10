/// API通信用の型定義
///
/// Wistia Data API のレスポンスをデシリアライズするための構造体を定義します。
/// よく使うフィールドだけを型付けし、それ以外は `extra` にそのまま保持します。
/// レスポンスの形は検証しないため、型付けしたフィールドもすべて省略可能です。
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// メディア
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    /// 数値ID
    #[serde(default)]
    pub id: Option<u64>,

    /// ハッシュID（他のAPI呼び出しで使用する識別子）
    #[serde(default)]
    pub hashed_id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// メディア種別（Video, Audio, Image など）
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,

    /// 処理状態（queued, processing, ready, failed）
    #[serde(default)]
    pub status: Option<String>,

    /// 長さ（秒）
    #[serde(default)]
    pub duration: Option<f64>,

    /// 作成日時（ISO 8601）
    #[serde(default)]
    pub created: Option<String>,

    #[serde(default)]
    pub updated: Option<String>,

    #[serde(default)]
    pub project: Option<ProjectRef>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Media {
    /// 指定した種別のアセットを探す（大文字小文字は区別しない）
    pub fn find_asset(&self, asset_type: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| {
            asset
                .asset_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(asset_type))
        })
    }
}

/// メディアが属するプロジェクト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hashed_id: Option<String>,
}

/// アセット（ダウンロード可能なファイル）
///
/// `url` と `fileSize` はダウンロード時にだけ必須です。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub url: Option<String>,

    /// 宣言されたバイト数
    #[serde(default, rename = "fileSize")]
    pub file_size: Option<u64>,

    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,

    #[serde(default, rename = "contentType")]
    pub content_type: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

/// 字幕
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caption {
    /// 言語コード（例: eng, fr）
    #[serde(default)]
    pub language: String,

    /// 字幕本文（SRT）
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub english_name: Option<String>,

    #[serde(default)]
    pub native_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
