/// プレゼンテーション層: ダウンロード進捗表示DTO
///
/// ドメイン層の`DownloadProgress`をUI表示に適した形式に変換します。
/// `Option<DisplayProgress>`で表示抑制を明示的に表現します。
use crate::domain::formatter::format_size;
use crate::domain::progress::{DownloadPhase, DownloadProgress};

/// 進捗表示のカテゴリ
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressCategory {
    /// メディア情報の取得・アセット選択
    Preparation,
    /// 受信中
    Transfer,
    /// 完了
    Completed,
}

/// プレゼンテーション層用の進捗情報
#[derive(Debug, Clone)]
pub struct DisplayProgress {
    pub message: String,
    pub category: ProgressCategory,
}

impl DisplayProgress {
    pub fn new(message: String, category: ProgressCategory) -> Self {
        Self { message, category }
    }
}

/// # 戻り値
/// - `Some(DisplayProgress)`: 表示すべき進捗情報
/// - `None`: 表示を抑制（10%刻み以外の受信進捗）
impl From<&DownloadProgress> for Option<DisplayProgress> {
    fn from(progress: &DownloadProgress) -> Self {
        match &progress.phase {
            DownloadPhase::ResolvingMedia { media_id } => Some(DisplayProgress::new(
                format!("Fetching media {}...", media_id),
                ProgressCategory::Preparation,
            )),
            DownloadPhase::AssetSelected {
                asset_type,
                size_bytes,
                content_type,
            } => {
                let content_type = content_type.as_deref().unwrap_or("unknown type");
                Some(DisplayProgress::new(
                    format!(
                        "Downloading {} ({}, {})",
                        asset_type,
                        format_size(*size_bytes),
                        content_type
                    ),
                    ProgressCategory::Preparation,
                ))
            }
            DownloadPhase::Downloading {
                percent,
                bytes_received,
                total_bytes,
            } => format_downloading(*percent, *bytes_received, *total_bytes),
            DownloadPhase::Completed {
                output_path,
                size_bytes,
            } => Some(DisplayProgress::new(
                format!("Saved {} ({})", output_path, format_size(*size_bytes)),
                ProgressCategory::Completed,
            )),
        }
    }
}

fn format_downloading(percent: u8, bytes_received: u64, total_bytes: u64) -> Option<DisplayProgress> {
    if percent % 10 != 0 {
        return None;
    }
    Some(DisplayProgress::new(
        format!(
            "  {:>3}% ({} / {})",
            percent,
            format_size(bytes_received),
            format_size(total_bytes)
        ),
        ProgressCategory::Transfer,
    ))
}

/// 進捗イベントを出力する
///
/// * `machine_output = false`: 人間向けメッセージ（stderr）
/// * `machine_output = true`: 1イベント1行のJSON（stdout）
pub fn emit(progress: &DownloadProgress, machine_output: bool) {
    if machine_output {
        if let Ok(line) = serde_json::to_string(&progress.phase) {
            println!("{}", line);
        }
    } else if let Some(display) = Option::<DisplayProgress>::from(progress) {
        eprintln!("{}", display.message);
    }
}
