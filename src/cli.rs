use crate::commands::{self, CommandResult};
use crate::commands::download::DownloadArgs;
use crate::commands::list::ListArgs;
use crate::config::APP_CONFIG;
use crate::presentation::{input, progress};
use anyhow::{Context, Result, bail};

/// 解析済みのCLI引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    /// `--machine` 指定時は結果をJSONで stdout に出力
    pub machine_output: bool,
    pub command: Command,
}

/// 実行するコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { from_stdin: bool },
    Logout,
    Status,
    List(ListArgs),
    Show { media_id: String },
    Delete { media_id: String, force: bool },
    Download { args: DownloadArgs, show_progress: bool },
    CaptionsList { media_id: String },
    CaptionsUpload { media_id: String, language: String, file_path: String },
    CaptionsDelete { media_id: String, language: String, force: bool },
    Help,
}

/// 値を取るオプション
const VALUE_OPTIONS: &[&str] = &["--page", "--per-page", "--asset"];

/// 位置引数とオプションに分けた引数
struct SplitArgs {
    positional: Vec<String>,
    flags: Vec<String>,
    options: Vec<(String, String)>,
}

impl SplitArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut split = Self {
            positional: Vec::new(),
            flags: Vec::new(),
            options: Vec::new(),
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if VALUE_OPTIONS.contains(&arg.as_str()) {
                let value = iter
                    .next()
                    .with_context(|| format!("Option '{}' requires a value", arg))?;
                split.options.push((arg.clone(), value.clone()));
            } else if arg.starts_with("--") {
                split.flags.push(arg.clone());
            } else {
                split.positional.push(arg.clone());
            }
        }
        Ok(split)
    }

    fn flag(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f == name)
    }

    fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn positive_option(&self, name: &str) -> Result<Option<u32>> {
        self.option(name)
            .map(|value| match value.parse::<u32>() {
                Ok(n) if n > 0 => Ok(n),
                _ => bail!("Option '{}' must be a positive integer, got '{}'", name, value),
            })
            .transpose()
    }

    fn positional(&self, index: usize, what: &str) -> Result<String> {
        self.positional
            .get(index)
            .cloned()
            .with_context(|| format!("Please specify {}", what))
    }

    fn reject_unknown_flags(&self, allowed: &[&str]) -> Result<()> {
        if let Some(unknown) = self.flags.iter().find(|f| !allowed.contains(&f.as_str())) {
            bail!("Unknown option: '{}'. Use 'help' to see available options.", unknown);
        }
        Ok(())
    }
}

/// CLI引数を解析する
///
/// `args[0]` はプログラム名。引数がない場合はヘルプを返します。
pub fn parse_args(args: &[String]) -> Result<ParsedArgs> {
    let mut rest: Vec<String> = args.iter().skip(1).cloned().collect();

    let machine_output = rest.iter().any(|a| a == "--machine");
    rest.retain(|a| a != "--machine");

    let Some(command_name) = rest.first().cloned() else {
        return Ok(ParsedArgs {
            machine_output,
            command: Command::Help,
        });
    };
    let split = SplitArgs::parse(&rest[1..])?;

    let command = match command_name.as_str() {
        "login" => {
            split.reject_unknown_flags(&["--stdin"])?;
            Command::Login {
                from_stdin: split.flag("--stdin"),
            }
        }
        "logout" => {
            split.reject_unknown_flags(&[])?;
            Command::Logout
        }
        "status" => {
            split.reject_unknown_flags(&[])?;
            Command::Status
        }
        "list" => {
            split.reject_unknown_flags(&[])?;
            Command::List(ListArgs {
                project_id: split.positional.first().cloned(),
                page: split.positive_option("--page")?,
                per_page: split
                    .positive_option("--per-page")?
                    .unwrap_or(APP_CONFIG.api.default_per_page),
            })
        }
        "show" => {
            split.reject_unknown_flags(&[])?;
            Command::Show {
                media_id: split.positional(0, "a media id for show command")?,
            }
        }
        "delete" => {
            split.reject_unknown_flags(&["--force"])?;
            Command::Delete {
                media_id: split.positional(0, "a media id for delete command")?,
                force: split.flag("--force"),
            }
        }
        "download" => {
            split.reject_unknown_flags(&["--overwrite", "--progress"])?;
            Command::Download {
                args: DownloadArgs {
                    media_id: split.positional(0, "a media id for download command")?,
                    output_path: split.positional(1, "an output file for download command")?,
                    asset_type: split.option("--asset").map(str::to_string),
                    overwrite: split.flag("--overwrite"),
                },
                show_progress: split.flag("--progress"),
            }
        }
        "captions" => parse_captions(&split)?,
        "help" => Command::Help,
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command_name
        ),
    };

    Ok(ParsedArgs {
        machine_output,
        command,
    })
}

fn parse_captions(split: &SplitArgs) -> Result<Command> {
    let action = split.positional(0, "a captions action (list, upload, delete)")?;
    match action.as_str() {
        "list" => {
            split.reject_unknown_flags(&[])?;
            Ok(Command::CaptionsList {
                media_id: split.positional(1, "a media id")?,
            })
        }
        "upload" => {
            split.reject_unknown_flags(&[])?;
            Ok(Command::CaptionsUpload {
                media_id: split.positional(1, "a media id")?,
                language: split.positional(2, "a language code")?,
                file_path: split.positional(3, "a caption file")?,
            })
        }
        "delete" => {
            split.reject_unknown_flags(&["--force"])?;
            Ok(Command::CaptionsDelete {
                media_id: split.positional(1, "a media id")?,
                language: split.positional(2, "a language code")?,
                force: split.flag("--force"),
            })
        }
        other => bail!(
            "Unknown captions action: '{}'. Expected list, upload or delete.",
            other
        ),
    }
}

/// 解析済みのコマンドを実行する
pub async fn run(parsed: ParsedArgs) -> Result<CommandResult> {
    let machine_output = parsed.machine_output;

    match parsed.command {
        Command::Login { from_stdin } => {
            let token = if from_stdin || machine_output {
                input::read_token_from_stdin()?
            } else {
                input::read_token_interactive()?
            };
            commands::login::execute(token)
                .await
                .context("Login command failed")
        }
        Command::Logout => commands::logout::execute()
            .await
            .context("Logout command failed"),
        Command::Status => commands::status::execute()
            .await
            .context("Status command failed"),
        Command::List(args) => commands::list::execute(args)
            .await
            .context("List command failed"),
        Command::Show { media_id } => commands::show::execute(&media_id)
            .await
            .context("Show command failed"),
        Command::Delete { media_id, force } => {
            let confirmed = confirm_destructive(
                force,
                machine_output,
                &format!("Permanently delete media {}?", media_id),
            )?;
            commands::delete::execute(&media_id, confirmed)
                .await
                .context("Delete command failed")
        }
        Command::Download {
            args,
            show_progress,
        } => commands::download::execute(args, |event| {
            if show_progress {
                progress::emit(&event, machine_output);
            }
        })
        .await
        .context("Download command failed"),
        Command::CaptionsList { media_id } => commands::captions::list(&media_id)
            .await
            .context("Captions list command failed"),
        Command::CaptionsUpload {
            media_id,
            language,
            file_path,
        } => commands::captions::upload(&media_id, &language, &file_path)
            .await
            .context("Captions upload command failed"),
        Command::CaptionsDelete {
            media_id,
            language,
            force,
        } => {
            let confirmed = confirm_destructive(
                force,
                machine_output,
                &format!("Delete {} captions of media {}?", language, media_id),
            )?;
            commands::captions::delete(&media_id, &language, confirmed)
                .await
                .context("Captions delete command failed")
        }
        Command::Help => commands::help::execute().await,
    }
}

/// 削除系コマンドの確認
///
/// `--machine` ではプロンプトを出せないため `--force` を必須にします。
fn confirm_destructive(force: bool, machine_output: bool, prompt: &str) -> Result<bool> {
    if force {
        return Ok(true);
    }
    if machine_output {
        bail!("--force is required for destructive commands in --machine mode");
    }
    input::confirm(prompt)
}
