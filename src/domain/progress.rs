use serde::Serialize;
/// ドメイン層: ダウンロード進捗イベント定義
///
/// ダウンロード処理の各段階をイベントとして表現します。
/// プレゼンテーション層はこれらを受け取り、人間向けまたは機械向けに表示します。
use std::time::SystemTime;

/// ダウンロード処理の各段階を表すイベント
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DownloadPhase {
    /// メディア情報を取得中
    ResolvingMedia { media_id: String },

    /// ダウンロード対象のアセットを決定
    AssetSelected {
        asset_type: String,
        size_bytes: u64,
        content_type: Option<String>,
    },

    /// 受信中（1%単位で通知）
    Downloading {
        percent: u8,
        bytes_received: u64,
        total_bytes: u64,
    },

    /// ダウンロード完了
    Completed { output_path: String, size_bytes: u64 },
}

/// ダウンロード進捗情報
#[derive(Debug, Clone, Serialize)]
pub struct DownloadProgress {
    pub phase: DownloadPhase,
    #[serde(skip)]
    pub timestamp: SystemTime,
}

impl DownloadProgress {
    pub fn new(phase: DownloadPhase) -> Self {
        Self {
            phase,
            timestamp: SystemTime::now(),
        }
    }
}

/// クライアントから届く割合を、1%以上進んだときだけイベントに変換する
///
/// 宣言サイズが実際より小さい場合でも100%で頭打ちにします。
#[derive(Debug)]
pub struct PercentTracker {
    total_bytes: u64,
    last_percent: Option<u8>,
}

impl PercentTracker {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            last_percent: None,
        }
    }

    /// 割合を受け取り、通知すべき場合にイベントを返す
    pub fn observe(&mut self, fraction: f64) -> Option<DownloadProgress> {
        let percent = (fraction.clamp(0.0, 1.0) * 100.0).floor() as u8;
        if self.last_percent.is_some_and(|last| percent <= last) {
            return None;
        }
        self.last_percent = Some(percent);

        Some(DownloadProgress::new(DownloadPhase::Downloading {
            percent,
            bytes_received: (fraction * self.total_bytes as f64).round() as u64,
            total_bytes: self.total_bytes,
        }))
    }
}
