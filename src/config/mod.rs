/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - ビルド時に埋め込まれる静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定（APIトークンなど）
///
/// # 使用例
///
/// ```no_run
/// use wistia_cli::config::{APP_CONFIG, UserConfig};
///
/// let endpoint = &APP_CONFIG.api.endpoint;
///
/// let user_config = UserConfig::load()?;
/// let token = user_config.resolve_token()?;
/// # Ok::<(), wistia_cli::config::error::ConfigError>(())
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use user::UserConfig;
