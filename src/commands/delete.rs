use crate::commands::connect;
use crate::commands::result::{CommandResult, DeleteResult};
use anyhow::{Context, Result};

/// 削除コマンドを実行する
///
/// # 引数
/// * `media_id` - 削除対象のメディアのハッシュID
/// * `confirmed` - 確認済み（`--force` またはプロンプトで承認）かどうか
pub async fn execute(media_id: &str, confirmed: bool) -> Result<CommandResult> {
    if !confirmed {
        return Ok(CommandResult::Delete(DeleteResult {
            media_id: media_id.to_string(),
            deleted: None,
            cancelled: true,
        }));
    }

    let (client, _) = connect()?;

    let deleted = client
        .delete_media(media_id)
        .await
        .with_context(|| format!("Failed to delete media {}", media_id))?;

    Ok(CommandResult::Delete(DeleteResult {
        media_id: media_id.to_string(),
        deleted,
        cancelled: false,
    }))
}
