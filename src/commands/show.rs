use crate::commands::connect;
use crate::commands::result::{CommandResult, ShowResult};
use anyhow::{Context, Result};

/// メディア詳細を表示するコマンドを実行する
///
/// # 引数
/// * `media_id` - メディアのハッシュID
pub async fn execute(media_id: &str) -> Result<CommandResult> {
    let (client, _) = connect()?;

    let media = client
        .show_media(media_id)
        .await
        .with_context(|| format!("Failed to fetch media {}", media_id))?;

    Ok(CommandResult::Show(ShowResult {
        media,
        media_id: media_id.to_string(),
    }))
}
