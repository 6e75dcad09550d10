pub mod captions;
pub mod delete;
pub mod download;
pub mod help;
pub mod list;
pub mod login;
pub mod logout;
pub mod result;
pub mod show;
pub mod status;

pub use result::CommandResult;

use crate::api::WistiaClient;
use crate::config::UserConfig;
use anyhow::{Context, Result};

/// ユーザー設定を読み込み、APIクライアントを初期化する
///
/// 各コマンド共通の前処理。トークンは環境変数が保存済みの値より優先されます。
pub(crate) fn connect() -> Result<(WistiaClient, UserConfig)> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    let token = user_config
        .resolve_token()
        .context("API token not found. Please run 'wistia login' first.")?;

    let client = WistiaClient::new(token).context("Failed to create API client")?;

    Ok((client, user_config))
}
