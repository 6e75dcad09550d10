/// ステータスコマンド
///
/// 現在のトークンでWistia APIにアクセスできるかを確認します。
use crate::api::WistiaClient;
use crate::commands::result::{CommandResult, StatusResult};
use crate::config::user::{TOKEN_ENV_VAR, UserConfig};
use anyhow::{Context, Result};
use tracing::info;

/// ステータスコマンドを実行
pub async fn execute() -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;

    let token_source = if std::env::var(TOKEN_ENV_VAR).is_ok_and(|t| !t.trim().is_empty()) {
        "env"
    } else if config.has_token() {
        "config"
    } else {
        return Ok(CommandResult::Status(StatusResult {
            is_authenticated: false,
            masked_token: None,
            token_source: None,
        }));
    };

    let token = config
        .resolve_token()
        .context("Failed to retrieve API token")?;
    let client = WistiaClient::new(token).context("Failed to create API client")?;

    // 認証失敗はエラーではなく未認証として報告する
    let is_authenticated = match client.show_account().await {
        Ok(_) => true,
        Err(e) => {
            info!(error = %e, "token verification failed");
            false
        }
    };

    Ok(CommandResult::Status(StatusResult {
        is_authenticated,
        masked_token: Some(client.masked_token()),
        token_source: Some(token_source.to_string()),
    }))
}
