/// アプリケーション設定モジュール
///
/// ビルド時に config.toml から読み込まれる静的設定を管理します。
/// これらの設定は実行時には変更できません。
use serde::Deserialize;
use std::sync::LazyLock;

/// 1 MiB あたりのバイト数
pub const BYTES_PER_MB: u64 = 1_048_576;

/// グローバルなアプリケーション設定
///
/// 初回アクセス時に埋め込み済みの config.toml をパースします。
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::load);

/// アプリケーション全体の設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub download: DownloadConfig,
    pub captions: CaptionsConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Wistia Data API のベースURL
    pub endpoint: String,

    /// APIリクエストのタイムアウト(秒)
    pub timeout_seconds: u64,

    /// 一覧取得時のデフォルトのページサイズ
    pub default_per_page: u32,
}

/// ダウンロード関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// アセット種別が指定されない場合に選択する種別
    pub default_asset_type: String,
}

/// 字幕アップロード関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionsConfig {
    /// アップロード可能な字幕ファイルの最大サイズ (バイト)
    pub max_file_size: u64,

    /// 対応する字幕フォーマット
    pub supported_formats: Vec<String>,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// ログレベル (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// ビルド時に埋め込まれたconfig.tomlから設定を読み込む
    ///
    /// # Panics
    /// 設定ファイルのパースに失敗した場合はパニックします。
    /// これはビルド時設定なので、実行時エラーではなくビルド構成の誤りとして扱います。
    pub fn load() -> Self {
        const CONFIG_STR: &str = include_str!("../../config.toml");
        toml::from_str(CONFIG_STR)
            .expect("Failed to parse embedded config.toml. This is a build-time configuration error.")
    }
}
