use crate::commands::connect;
use crate::commands::result::{CommandResult, ListResult};
use crate::domain::error::DomainError;
use anyhow::{Context, Result};
use futures::TryStreamExt;

/// リストコマンドの引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// 省略時は default_project_id を使用
    pub project_id: Option<String>,
    /// 指定時はそのページのみ、省略時は全ページ
    pub page: Option<u32>,
    pub per_page: u32,
}

/// リストコマンドを実行する
///
/// プロジェクトのメディアを新しい順に取得します。
/// ページ指定がない場合は短いページが返るまで順に取得します。
pub async fn execute(args: ListArgs) -> Result<CommandResult> {
    let (client, user_config) = connect()?;

    let project_id = args
        .project_id
        .or(user_config.default_project_id)
        .ok_or(DomainError::MissingProject)?;

    let medias = match args.page {
        Some(page) => client
            .list_media_page(&project_id, page, args.per_page)
            .await
            .with_context(|| format!("Failed to fetch page {} of project {}", page, project_id))?,
        None => client
            .list_all_media(&project_id, args.per_page)
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| format!("Failed to fetch medias of project {}", project_id))?,
    };

    let total_count = medias.len();

    Ok(CommandResult::List(ListResult {
        project_id,
        page: args.page,
        per_page: args.per_page,
        medias,
        total_count,
    }))
}
