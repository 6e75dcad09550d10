use crate::api::{Asset, ProgressCallback, WistiaClient};
use crate::commands::connect;
use crate::commands::result::{CommandResult, DownloadResult};
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use crate::domain::progress::{DownloadPhase, DownloadProgress, PercentTracker};
use crate::domain::validator;
use anyhow::{Context, Result};
use tracing::warn;

/// ダウンロードコマンドの引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArgs {
    pub media_id: String,
    pub output_path: String,
    /// 省略時は APP_CONFIG.download.default_asset_type
    pub asset_type: Option<String>,
    pub overwrite: bool,
}

/// ダウンロードコマンドを実行する
///
/// メディア詳細からアセットを選び、出力ファイルへストリーミングで保存します。
///
/// # 引数
/// * `args` - ダウンロード対象と出力先
/// * `on_progress` - 進捗イベントを受け取るコールバック
pub async fn execute<F>(args: DownloadArgs, mut on_progress: F) -> Result<CommandResult>
where
    F: FnMut(DownloadProgress) + Send,
{
    validator::validate_output_path(&args.output_path, args.overwrite)?;

    let (client, _) = connect()?;

    on_progress(DownloadProgress::new(DownloadPhase::ResolvingMedia {
        media_id: args.media_id.clone(),
    }));

    let media = client
        .show_media(&args.media_id)
        .await
        .with_context(|| format!("Failed to fetch media {}", args.media_id))?
        .with_context(|| format!("Media {} returned an empty response", args.media_id))?;

    let asset_type = args
        .asset_type
        .unwrap_or_else(|| APP_CONFIG.download.default_asset_type.clone());

    let asset = media.find_asset(&asset_type).ok_or_else(|| {
        let available: Vec<&str> = media
            .assets
            .iter()
            .filter_map(|a| a.asset_type.as_deref())
            .collect();
        DomainError::asset_not_found(&args.media_id, &asset_type, &available)
    })?;

    let declared_size = asset.file_size.unwrap_or(0);
    on_progress(DownloadProgress::new(DownloadPhase::AssetSelected {
        asset_type: asset_type.clone(),
        size_bytes: declared_size,
        content_type: asset.content_type.clone(),
    }));

    let mut tracker = PercentTracker::new(declared_size);
    let mut report = |fraction: f64| {
        if let Some(event) = tracker.observe(fraction) {
            on_progress(event);
        }
    };

    let size_bytes = download_to_path(&client, asset, &args.output_path, Some(&mut report as ProgressCallback<'_>))
        .await
        .with_context(|| format!("Failed to download media {}", args.media_id))?;

    on_progress(DownloadProgress::new(DownloadPhase::Completed {
        output_path: args.output_path.clone(),
        size_bytes,
    }));

    Ok(CommandResult::Download(DownloadResult {
        media_id: args.media_id,
        asset_type,
        output_path: args.output_path,
        size_bytes,
    }))
}

/// 書きかけのファイルのパス（出力先と同じディレクトリ）
fn partial_path(output_path: &str) -> String {
    format!("{}.part", output_path)
}

/// アセットを `output_path` へ保存し、書き込んだバイト数を返す
///
/// まず `<output_path>.part` に書き込み、成功したときだけ出力先へリネームします。
/// 失敗時は `.part` を削除するため、既存の出力ファイルはそのまま残ります。
pub async fn download_to_path(
    client: &WistiaClient,
    asset: &Asset,
    output_path: &str,
    progress: Option<ProgressCallback<'_>>,
) -> Result<u64> {
    let partial = partial_path(output_path);
    let mut file = tokio::fs::File::create(&partial)
        .await
        .with_context(|| format!("Failed to create output file {}", partial))?;

    let outcome = client.download_asset(asset, &mut file, progress).await;
    drop(file);

    if let Err(e) = outcome {
        if let Err(remove_err) = tokio::fs::remove_file(&partial).await {
            warn!(path = %partial, error = %remove_err, "failed to remove partial download");
        }
        return Err(e.into());
    }

    tokio::fs::rename(&partial, output_path)
        .await
        .with_context(|| format!("Failed to move {} to {}", partial, output_path))?;

    let size_bytes = tokio::fs::metadata(output_path)
        .await
        .map(|m| m.len())
        .with_context(|| format!("Failed to inspect output file {}", output_path))?;
    Ok(size_bytes)
}
