//! ログ出力の初期化
//!
//! ログは stderr に出力し、stdout は `--machine` のJSON出力用に空けておく。
//! `RUST_LOG` が設定されていればそれを、なければ APP_CONFIG.logging.level を使う。

use crate::config::APP_CONFIG;
use tracing_subscriber::EnvFilter;

/// グローバルなサブスクライバーを設定する
///
/// 既に設定済みの場合（テストなど）は何もしない。
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive() -> String {
    format!("wistia_cli={}", APP_CONFIG.logging.level)
}
