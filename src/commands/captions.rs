//! 字幕コマンド
//!
//! `captions list | upload | delete` のサブコマンドを実行します。
use crate::commands::connect;
use crate::commands::result::{
    CaptionDeleteResult, CaptionListResult, CaptionUploadResult, CommandResult,
};
use crate::domain::validator;
use anyhow::{Context, Result};

/// メディアの字幕一覧を取得する
pub async fn list(media_id: &str) -> Result<CommandResult> {
    let (client, _) = connect()?;

    let captions = client
        .list_captions(media_id)
        .await
        .with_context(|| format!("Failed to list captions of media {}", media_id))?;

    Ok(CommandResult::CaptionList(CaptionListResult {
        media_id: media_id.to_string(),
        captions,
    }))
}

/// 字幕ファイルを検証してアップロードする
///
/// # 引数
/// * `media_id` - メディアのハッシュID
/// * `language` - 言語コード
/// * `file_path` - SRT / VTT ファイルのパス
pub async fn upload(media_id: &str, language: &str, file_path: &str) -> Result<CommandResult> {
    validator::validate_language_code(language)?;
    let caption_file =
        validator::validate_caption_file(file_path).context("Caption file validation failed")?;

    let (client, _) = connect()?;

    let response = client
        .upload_caption(media_id, language, caption_file.content)
        .await
        .with_context(|| {
            format!(
                "Failed to upload {} captions for media {}",
                language, media_id
            )
        })?;

    Ok(CommandResult::CaptionUpload(CaptionUploadResult {
        media_id: media_id.to_string(),
        language: language.to_string(),
        file_path: caption_file.path,
        response,
    }))
}

/// 指定言語の字幕を削除する
///
/// `confirmed` が false の場合は何もせず中止として返します。
pub async fn delete(media_id: &str, language: &str, confirmed: bool) -> Result<CommandResult> {
    validator::validate_language_code(language)?;

    if confirmed {
        let (client, _) = connect()?;
        client
            .delete_caption(media_id, language)
            .await
            .with_context(|| {
                format!(
                    "Failed to delete {} captions for media {}",
                    language, media_id
                )
            })?;
    }

    Ok(CommandResult::CaptionDelete(CaptionDeleteResult {
        media_id: media_id.to_string(),
        language: language.to_string(),
        cancelled: !confirmed,
    }))
}
