use std::env;
use wistia_cli::api::RequestError;
use wistia_cli::cli;
use wistia_cli::config::error::ConfigError;
use wistia_cli::domain::error::DomainError;
use wistia_cli::logging;
use wistia_cli::presentation::output;

#[tokio::main]
async fn main() {
    logging::init();

    let args: Vec<String> = env::args().collect();
    let machine_output = args.iter().any(|a| a == "--machine");

    let outcome = match cli::parse_args(&args) {
        Ok(parsed) => cli::run(parsed).await,
        Err(e) => Err(e),
    };

    let result = outcome.and_then(|result| output::output_result(&result, machine_output));

    if let Err(e) = result {
        let exit_code = determine_exit_code(&e);
        output::output_error(&e, exit_code, get_error_hint(&e), machine_output);
        std::process::exit(exit_code);
    }
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<DomainError>() {
            return err.severity().exit_code();
        }
        if let Some(err) = cause.downcast_ref::<RequestError>() {
            return err.severity().exit_code();
        }
        if let Some(err) = cause.downcast_ref::<ConfigError>() {
            return err.severity().exit_code();
        }
    }

    // 引数エラーなど
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<&str> {
    error.chain().find_map(|cause| {
        if let Some(err) = cause.downcast_ref::<DomainError>() {
            err.hint()
        } else if let Some(err) = cause.downcast_ref::<RequestError>() {
            err.hint()
        } else if let Some(err) = cause.downcast_ref::<ConfigError>() {
            err.hint()
        } else {
            None
        }
    })
}
