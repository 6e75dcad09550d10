use crate::commands::result::CommandResult;

/// ヘルプコマンドを実行
pub async fn execute() -> anyhow::Result<CommandResult> {
    Ok(CommandResult::Help)
}
