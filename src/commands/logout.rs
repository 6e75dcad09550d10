/// ログアウトコマンド
///
/// 保存されているAPIトークンを削除します。
use crate::commands::result::{CommandResult, LogoutResult};
use crate::config::user::UserConfig;
use anyhow::{Context, Result};

/// ログアウトコマンドを実行
pub async fn execute() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    if !config.has_token() {
        return Ok(CommandResult::Logout(LogoutResult {
            was_logged_in: false,
        }));
    }

    config.clear_token();
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Logout(LogoutResult {
        was_logged_in: true,
    }))
}
