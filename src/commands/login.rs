/// ログインコマンド
///
/// Wistia API トークンを検証し、config.toml に保存します。
use crate::api::WistiaClient;
use crate::commands::result::{CommandResult, LoginResult};
use crate::config::user::UserConfig;
use anyhow::{Context, Result};

/// ログインコマンドを実行
///
/// # Arguments
/// * `api_token` - プレゼンテーション層で入力されたトークン
pub async fn execute(api_token: String) -> Result<CommandResult> {
    let client = WistiaClient::new(api_token.clone()).context("Invalid API token")?;

    eprintln!("Verifying API token...");
    client
        .show_account()
        .await
        .context("Authentication failed. Please verify your API token is correct.")?;

    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let was_logged_in = config.has_token();

    config.set_token(api_token);
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Login(LoginResult {
        was_logged_in,
        masked_token: client.masked_token(),
    }))
}
