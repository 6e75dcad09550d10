/// プレゼンテーション層: ユーザー入力処理
///
/// stdin からのトークン入力と確認プロンプトを扱い、
/// アプリケーション層で使用可能な形式に変換します。
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// 対話的にAPIトークンを取得
pub fn read_token_interactive() -> Result<String> {
    eprintln!("Logging in to Wistia...");
    eprintln!();
    eprintln!("Please enter your Wistia API token.");
    eprintln!("You can create one at: https://<account>.wistia.com/account/api");
    eprintln!();

    eprint!("API Token: ");
    io::stderr().flush()?;
    read_token(&mut io::stdin().lock())
}

/// stdin からパイプでAPIトークンを取得（1行目を使用）
pub fn read_token_from_stdin() -> Result<String> {
    read_token(&mut io::stdin().lock())
}

fn read_token(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read API token from input")?;

    let token = line.trim().to_string();
    if token.is_empty() {
        bail!("API token cannot be empty. Please provide a valid token.");
    }
    Ok(token)
}

/// y/N の確認プロンプト
///
/// `y` または `yes` 以外（空入力を含む）はすべて拒否として扱います。
pub fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N]: ", prompt);
    io::stderr().flush()?;
    read_confirmation(&mut io::stdin().lock())
}

fn read_confirmation(reader: &mut impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    reader
        .read_line(&mut answer)
        .context("Failed to read confirmation from input")?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
