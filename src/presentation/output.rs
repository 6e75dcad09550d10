/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読、stderr）または
/// 機械向け（JSON、stdout）形式で出力します。
use crate::api::Media;
use crate::commands::result::CommandResult;
use crate::config::UserConfig;
use crate::domain::formatter::{format_duration, format_size, format_timestamp};
use anyhow::Result;

/// ヘルプテキスト
pub const HELP_TEXT: &str = "wistia
Manage Wistia medias and captions from the command line

Usage:
  wistia [--machine] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)

Available commands:
  login [--stdin]  - Save a Wistia API token
                     With --stdin: read the token from the first line of stdin
  logout           - Remove the saved API token
  status           - Check whether the API token works
  list [<project_id>] [--page <n>] [--per-page <n>]
                   - List medias of a project, newest first
                     Without --page every page is fetched
  show <media_id>  - Show details and assets of a media
  delete <media_id> [--force]
                   - Delete a media (--force skips confirmation)
  download <media_id> <output> [--asset <type>] [--overwrite] [--progress]
                   - Download an asset of a media (default type: OriginalFile)
                     Data goes to <output>.part and replaces <output> only on success
  captions list <media_id>
                   - List captions of a media
  captions upload <media_id> <language> <file>
                   - Upload an SRT/VTT caption file
  captions delete <media_id> <language> [--force]
                   - Delete the captions of one language
  help             - Display this help message

Environment:
  WISTIA_API_TOKEN - Overrides the saved API token
  RUST_LOG         - Log filter (e.g. wistia_cli=debug)";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", machine_readable(result)?);
    } else {
        output_human_readable(result);
    }
    Ok(())
}

/// エラーを出力する
///
/// 人間向けはエラーチェーンとヒントを stderr、機械向けは JSON を stdout に出力します。
pub fn output_error(error: &anyhow::Error, exit_code: i32, hint: Option<&str>, machine_output: bool) {
    if machine_output {
        let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
        let json = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "causes": causes,
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        return;
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }
}

/// 機械可読JSONを生成する
fn machine_readable(result: &CommandResult) -> Result<String> {
    let mut json = serde_json::to_value(result)?;
    if let Some(object) = json.as_object_mut() {
        object.insert("success".to_string(), serde_json::Value::Bool(true));
        object.insert(
            "command".to_string(),
            serde_json::Value::String(result.command_name().to_string()),
        );
    }
    Ok(serde_json::to_string(&json)?)
}

fn output_human_readable(result: &CommandResult) {
    // 日時表示用。読めない場合はUTC
    let offset = UserConfig::load()
        .map(|c| c.timezone_offset_seconds)
        .unwrap_or(0);

    match result {
        CommandResult::Login(r) => {
            eprintln!();
            if r.was_logged_in {
                eprintln!("✓ API token updated ({}).", r.masked_token);
            } else {
                eprintln!("✓ Login successful ({}).", r.masked_token);
            }
            eprintln!("The API token has been saved.");
        }
        CommandResult::Logout(r) => {
            if r.was_logged_in {
                eprintln!("Logged out successfully.");
                eprintln!("The API token has been removed.");
            } else {
                eprintln!("Already logged out.");
            }
        }
        CommandResult::Status(r) => {
            eprintln!();
            match (&r.masked_token, r.is_authenticated) {
                (Some(token), true) => {
                    eprintln!("Authenticated");
                    eprintln!("Token: {} (from {})", token, r.token_source.as_deref().unwrap_or("config"));
                }
                (Some(token), false) => {
                    eprintln!("✗ Authentication failed");
                    eprintln!("  Token: {}", token);
                    eprintln!();
                    eprintln!("Your token may be invalid or revoked.");
                    eprintln!("Please run 'wistia login' to update it.");
                }
                (None, _) => {
                    eprintln!("Not logged in");
                    eprintln!("Please run 'wistia login' or set WISTIA_API_TOKEN.");
                }
            }
        }
        CommandResult::List(r) => {
            eprintln!();
            if r.total_count == 0 {
                eprintln!("No medias found in project {}.", r.project_id);
            } else {
                match r.page {
                    Some(page) => eprintln!(
                        "Project {}: {} media(s) on page {} ({} per page)",
                        r.project_id, r.total_count, page, r.per_page
                    ),
                    None => eprintln!("Project {}: {} media(s)", r.project_id, r.total_count),
                }
                eprintln!();
                for media in &r.medias {
                    print_media_summary(media, offset);
                }
                eprintln!("---");
            }
        }
        CommandResult::Show(r) => match &r.media {
            Some(media) => {
                eprintln!();
                print_media_summary(media, offset);
                if media.assets.is_empty() {
                    eprintln!("No assets available");
                } else {
                    eprintln!("Assets:");
                    for asset in &media.assets {
                        let size = asset
                            .file_size
                            .map(format_size)
                            .unwrap_or_else(|| "unknown size".to_string());
                        let kind = asset.asset_type.as_deref().unwrap_or("unknown");
                        match (asset.width, asset.height) {
                            (Some(w), Some(h)) => eprintln!("  {:<18} {}x{}  {}", kind, w, h, size),
                            _ => eprintln!("  {:<18} {}", kind, size),
                        }
                    }
                }
                eprintln!();
            }
            None => eprintln!("Media {} returned no data.", r.media_id),
        },
        CommandResult::Delete(r) => {
            if r.cancelled {
                eprintln!("Deletion cancelled.");
            } else {
                eprintln!();
                eprintln!("✓ Media deleted successfully!");
                eprintln!("Media ID: {}", r.media_id);
                if let Some(name) = r.deleted.as_ref().and_then(|m| m.name.as_deref()) {
                    eprintln!("Name: {}", name);
                }
            }
        }
        CommandResult::Download(r) => {
            eprintln!();
            eprintln!("✓ Download completed!");
            eprintln!("Media ID: {}", r.media_id);
            eprintln!("Asset:    {}", r.asset_type);
            eprintln!("Saved to: {} ({})", r.output_path, format_size(r.size_bytes));
        }
        CommandResult::CaptionList(r) => {
            eprintln!();
            if r.captions.is_empty() {
                eprintln!("No captions for media {}.", r.media_id);
            } else {
                eprintln!("Captions for media {}:", r.media_id);
                for caption in &r.captions {
                    let name = caption
                        .english_name
                        .as_deref()
                        .or(caption.native_name.as_deref())
                        .unwrap_or("");
                    eprintln!("  {:<8} {}", caption.language, name);
                }
            }
        }
        CommandResult::CaptionUpload(r) => {
            eprintln!("✓ Uploaded {} captions for media {} from {}", r.language, r.media_id, r.file_path);
        }
        CommandResult::CaptionDelete(r) => {
            if r.cancelled {
                eprintln!("Deletion cancelled.");
            } else {
                eprintln!("✓ Deleted {} captions for media {}", r.language, r.media_id);
            }
        }
        CommandResult::Help => {
            eprintln!("{}", HELP_TEXT);
        }
    }
}

fn print_media_summary(media: &Media, offset: i32) {
    eprintln!("---");
    eprintln!("Media ID: {}", media.hashed_id);
    if let Some(name) = &media.name {
        eprintln!("Name:     {}", name);
    }
    if let Some(kind) = &media.media_type {
        eprintln!("Type:     {}", kind);
    }
    if let Some(status) = &media.status {
        eprintln!("Status:   {}", status);
    }
    if let Some(duration) = media.duration {
        eprintln!("Duration: {}", format_duration(duration));
    }
    if let Some(created) = &media.created {
        eprintln!("Created:  {}", format_timestamp(created, offset));
    }
}
