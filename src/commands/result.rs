/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::api::{Caption, Media};
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Login(LoginResult),
    Logout(LogoutResult),
    Status(StatusResult),
    List(ListResult),
    Show(ShowResult),
    Delete(DeleteResult),
    Download(DownloadResult),
    CaptionList(CaptionListResult),
    CaptionUpload(CaptionUploadResult),
    CaptionDelete(CaptionDeleteResult),
    Help,
}

/// ログインコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// 既にログイン済みだったか（上書き更新の場合true）
    pub was_logged_in: bool,
    pub masked_token: String,
}

/// ログアウトコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResult {
    pub was_logged_in: bool,
}

/// ステータスコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    /// トークンでAPIにアクセスできたか
    pub is_authenticated: bool,
    /// マスキングされたトークン（トークンがある場合）
    pub masked_token: Option<String>,
    /// トークンの取得元（"env" または "config"）
    pub token_source: Option<String>,
}

/// リストコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub project_id: String,
    /// 1ページのみ取得した場合のページ番号（全件取得時は None）
    pub page: Option<u32>,
    pub per_page: u32,
    pub medias: Vec<Media>,
    pub total_count: usize,
}

/// 詳細表示コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ShowResult {
    pub media: Option<Media>,
    pub media_id: String,
}

/// 削除コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub media_id: String,
    /// 削除されたメディア（レスポンスが空の場合は None）
    pub deleted: Option<Media>,
    /// 確認プロンプトで中止された
    pub cancelled: bool,
}

/// ダウンロードコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct DownloadResult {
    pub media_id: String,
    pub asset_type: String,
    pub output_path: String,
    pub size_bytes: u64,
}

/// 字幕一覧コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct CaptionListResult {
    pub media_id: String,
    pub captions: Vec<Caption>,
}

/// 字幕アップロードコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct CaptionUploadResult {
    pub media_id: String,
    pub language: String,
    pub file_path: String,
    pub response: Option<serde_json::Value>,
}

/// 字幕削除コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct CaptionDeleteResult {
    pub media_id: String,
    pub language: String,
    pub cancelled: bool,
}

impl CommandResult {
    /// コマンド名（機械向け出力用）
    pub fn command_name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Logout(_) => "logout",
            Self::Status(_) => "status",
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Delete(_) => "delete",
            Self::Download(_) => "download",
            Self::CaptionList(_) => "captions_list",
            Self::CaptionUpload(_) => "captions_upload",
            Self::CaptionDelete(_) => "captions_delete",
            Self::Help => "help",
        }
    }
}
